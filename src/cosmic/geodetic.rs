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

use super::{WGS84_FLATTENING, WGS84_SEMI_MAJOR_RADIUS_KM};
use crate::linalg::Vector3;
use crate::utils::{between_pm_180, is_finite_vector};
use std::fmt;

const CONVERGENCE_EPS: f64 = 1e-12;
const MAX_ATTEMPTS: usize = 20;

/// Geodetic coordinates with respect to the WGS84 ellipsoid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeodeticCoords {
    /// Longitude in degrees, between -180 and +180
    pub longitude_deg: f64,
    /// Geodetic latitude in degrees, between -90 and +90
    pub latitude_deg: f64,
    /// Height above the ellipsoid in km
    pub altitude_km: f64,
}

impl GeodeticCoords {
    pub fn nan() -> Self {
        Self {
            longitude_deg: f64::NAN,
            latitude_deg: f64::NAN,
            altitude_km: f64::NAN,
        }
    }

    /// True if both the longitude and the latitude are finite.
    pub fn is_finite(&self) -> bool {
        self.longitude_deg.is_finite() && self.latitude_deg.is_finite()
    }
}

impl fmt::Display for GeodeticCoords {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "lon = {:>10.4} deg  lat = {:>9.4} deg  alt = {:>10.3} km",
            self.longitude_deg, self.latitude_deg, self.altitude_km
        )
    }
}

/// Converts an ECEF position (km) into WGS84 geodetic coordinates.
///
/// Non-finite inputs are passed through as NaN coordinates.
///
/// Reference: Vallado, 4th Ed., Algorithm 12 page 172.
pub fn ecef_to_geodetic(position_km: &Vector3<f64>) -> GeodeticCoords {
    if !is_finite_vector(position_km) {
        return GeodeticCoords::nan();
    }

    let (x_km, y_km, z_km) = (position_km.x, position_km.y, position_km.z);
    let semi_major_radius = WGS84_SEMI_MAJOR_RADIUS_KM;
    let flattening = WGS84_FLATTENING;
    let e2 = flattening * (2.0 - flattening);

    let r_delta = (x_km.powi(2) + y_km.powi(2)).sqrt();
    let mut latitude = (z_km / position_km.norm()).asin();
    let mut attempt_no = 0;
    loop {
        attempt_no += 1;
        let c_earth = semi_major_radius / ((1.0 - e2 * latitude.sin().powi(2)).sqrt());
        let new_latitude = (z_km + c_earth * e2 * latitude.sin()).atan2(r_delta);
        let delta = (latitude - new_latitude).abs();
        latitude = new_latitude;
        if delta < CONVERGENCE_EPS || delta.is_nan() {
            break;
        } else if attempt_no >= MAX_ATTEMPTS {
            warn!("geodetic latitude failed to converge -- error = {delta}");
            break;
        }
    }

    let sin_lat = latitude.sin();
    let cos_lat = latitude.cos();
    let altitude_km = if cos_lat.abs() < 0.1 {
        // Near the poles, the height is better conditioned from the polar component.
        let s_earth = (semi_major_radius * (1.0 - flattening).powi(2))
            / ((1.0 - e2 * sin_lat.powi(2)).sqrt());
        z_km / sin_lat - s_earth
    } else {
        let c_earth = semi_major_radius / ((1.0 - e2 * sin_lat.powi(2)).sqrt());
        r_delta / cos_lat - c_earth
    };

    GeodeticCoords {
        longitude_deg: between_pm_180(y_km.atan2(x_km).to_degrees()),
        latitude_deg: latitude.to_degrees(),
        altitude_km,
    }
}

/// Converts every ECEF position of the batch, preserving its length and order.
pub fn convert_batch(positions_km: &[Vector3<f64>]) -> Vec<GeodeticCoords> {
    positions_km.iter().map(ecef_to_geodetic).collect()
}
