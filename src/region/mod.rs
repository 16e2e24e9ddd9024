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

use crate::cosmic::GroundSample;
use serde_derive::{Deserialize, Serialize};
use snafu::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Minimum number of distinct vertices of a polygon.
pub const MIN_VERTICES: usize = 3;

#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RegionError {
    #[snafu(display("a region needs at least 3 vertices but {count} provided"))]
    TooFewVertices { count: usize },
    #[snafu(display("vertex #{index} ({lat}, {lon}) is not a valid latitude/longitude pair"))]
    InvalidVertex { index: usize, lat: f64, lon: f64 },
    #[snafu(display("`{input}` is not a latitude longitude pair, e.g. `1.1 2.2`"))]
    InvalidPair { input: String },
}

/// A latitude/longitude pair in degrees, as entered by the user.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True if the latitude is within [-90, 90] and the longitude within [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && self.lat.abs() <= 90.0
            && self.lon.abs() <= 180.0
    }
}

impl FromStr for LatLon {
    type Err = RegionError;

    /// Parses a whitespace separated "latitude longitude" pair.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let values: Vec<&str> = input.split_whitespace().collect();
        if values.len() != 2 {
            return InvalidPairSnafu { input }.fail();
        }

        match (values[0].parse::<f64>(), values[1].parse::<f64>()) {
            (Ok(lat), Ok(lon)) => Ok(Self { lat, lon }),
            _ => InvalidPairSnafu { input }.fail(),
        }
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// A simple closed ring on the ground, in the (longitude, latitude) plane.
///
/// The ring is implicitly closed: the last vertex connects back to the first. Containment is
/// strict, i.e. points on the boundary are outside.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionPolygon {
    /// Vertices as (longitude, latitude) in degrees
    ring: Vec<(f64, f64)>,
}

impl RegionPolygon {
    /// Builds a polygon from latitude/longitude vertices.
    pub fn new(vertices: &[LatLon]) -> Result<Self, RegionError> {
        for (index, vertex) in vertices.iter().enumerate() {
            if !vertex.is_valid() {
                return InvalidVertexSnafu {
                    index,
                    lat: vertex.lat,
                    lon: vertex.lon,
                }
                .fail();
            }
        }

        let mut ring: Vec<(f64, f64)> = vertices.iter().map(|v| (v.lon, v.lat)).collect();
        // An explicitly closed ring repeats its first vertex
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }

        ensure!(
            ring.len() >= MIN_VERTICES,
            TooFewVerticesSnafu { count: ring.len() }
        );

        Ok(Self { ring })
    }

    /// Vertices of the ring as (longitude, latitude) in degrees.
    pub fn ring(&self) -> &[(f64, f64)] {
        &self.ring
    }

    /// Returns whether the point lies strictly inside the polygon.
    pub fn contains(&self, lon_deg: f64, lat_deg: f64) -> bool {
        if !lon_deg.is_finite() || !lat_deg.is_finite() {
            return false;
        }

        let mut inside = false;
        let n = self.ring.len();
        for i in 0..n {
            let (xi, yi) = self.ring[i];
            let (xj, yj) = self.ring[(i + n - 1) % n];

            if on_segment((lon_deg, lat_deg), (xi, yi), (xj, yj)) {
                return false;
            }

            // Even-odd rule: count the edges crossed by a ray cast towards +longitude.
            if (yi > lat_deg) != (yj > lat_deg) {
                let x_cross = xi + (lat_deg - yi) * (xj - xi) / (yj - yi);
                if lon_deg < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Returns one membership flag per sample.
    pub fn contains_all(&self, samples: &[GroundSample]) -> Vec<bool> {
        samples
            .iter()
            .map(|s| self.contains(s.longitude_deg(), s.latitude_deg()))
            .collect()
    }

    /// Keeps the samples with finite coordinates which are inside the polygon, in their order.
    pub fn filter(&self, samples: Vec<GroundSample>) -> Vec<GroundSample> {
        samples
            .into_iter()
            .filter(|s| s.coords.is_finite())
            .filter(|s| self.contains(s.longitude_deg(), s.latitude_deg()))
            .collect()
    }
}

impl fmt::Display for RegionPolygon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let vertices: Vec<String> = self
            .ring
            .iter()
            .map(|(lon, lat)| format!("({lat}, {lon})"))
            .collect();
        write!(f, "region [{}]", vertices.join(", "))
    }
}

/// True if `p` lies on the segment from `a` to `b`.
fn on_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> bool {
    let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
    if cross != 0.0 {
        return false;
    }
    p.0 >= a.0.min(b.0) && p.0 <= a.0.max(b.0) && p.1 >= a.1.min(b.1) && p.1 <= a.1.max(b.1)
}
