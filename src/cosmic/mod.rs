/*
    Groundtrack, day-long ground track extraction
    Copyright (C) 2026 The groundtrack developers

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::fmt;

/// Geocentric to geodetic conversion on the WGS84 ellipsoid.
pub mod geodetic;
pub use self::geodetic::{convert_batch, ecef_to_geodetic, GeodeticCoords};

/// WGS84 semi major axis, in kilometers
pub const WGS84_SEMI_MAJOR_RADIUS_KM: f64 = 6_378.137;
/// WGS84 flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// A ground track sample: the geodetic coordinates of one propagated sample.
///
/// The index is the position of the sample in the flattened propagation batch, from which the
/// satellite and the instant can be recovered with [`crate::propagators::PropagationBatch::split_index`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroundSample {
    pub index: usize,
    pub coords: GeodeticCoords,
}

impl GroundSample {
    pub fn new(index: usize, coords: GeodeticCoords) -> Self {
        Self { index, coords }
    }

    pub fn longitude_deg(&self) -> f64 {
        self.coords.longitude_deg
    }

    pub fn latitude_deg(&self) -> f64 {
        self.coords.latitude_deg
    }

    pub fn altitude_km(&self) -> f64 {
        self.coords.altitude_km
    }
}

impl fmt::Display for GroundSample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:<8} {}", self.index, self.coords)
    }
}
