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

/*! # groundtrack

Propagates a set of satellites from their two-line elements over one UTC day, at one sample per
minute, with SGP4. Every sample is then converted to WGS84 geodetic coordinates and only those
above a ground polygon are kept. The conversion and the filtering are split into chunks processed
in parallel.

```no_run
use groundtrack::io::ConfigRepr;
use groundtrack::pipeline::{run_from_file, GroundTrackConfig};

let config = GroundTrackConfig::load("groundtrack.yaml").unwrap();
let report = run_from_file(&config, "active.tle").unwrap();
println!("{report}");
```
*/

/// Evaluation instants of one UTC day.
pub mod time_grid;

/// Loading of satellites from two-line element sets.
pub mod tle;

/// Batch SGP4 propagation and its error vocabulary.
pub mod propagators;

/// Geodetic coordinates and frame conversions.
pub mod cosmic;

/// Ground polygons and point-in-polygon filtering.
pub mod region;

/// Parallel processing of the propagated positions, by chunks.
pub mod executor;

/// The end to end ground track computation.
pub mod pipeline;

/// Utility functions shared by different modules.
pub mod utils;

mod errors;
/// Groundtrack will (almost) never panic and functions which may fail will return an error.
pub use self::errors::GroundTrackError;

/// Reading of TLE files and YAML configurations.
pub mod io;

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}
