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

use super::{PropagationDiagnostics, PropagationErrorKind};
use crate::linalg::Vector3;
use crate::time::Unit;
use crate::time_grid::TimeGrid;
use crate::tle::{SatelliteRecord, SatelliteSet};
use crate::utils::nan_vector;
use rayon::prelude::*;
use std::time::Instant as StdInstant;

/// Julian date of J2000 (2000-01-01T12:00:00).
const J2000_JD: f64 = 2_451_545.0;
const MINUTES_PER_DAY: f64 = 1_440.0;

/// Output of a batch propagation, flattened satellite-major: the sample of satellite `i` at
/// instant `j` is at index `i * num_instants + j` of every array.
#[derive(Clone, Debug)]
pub struct PropagationBatch {
    num_satellites: usize,
    num_instants: usize,
    errors: Vec<Option<PropagationErrorKind>>,
    /// Positions in km
    positions: Vec<Vector3<f64>>,
    /// Velocities in km/s, carried along but not used downstream
    velocities: Vec<Vector3<f64>>,
    diagnostics: PropagationDiagnostics,
}

impl PropagationBatch {
    pub fn num_satellites(&self) -> usize {
        self.num_satellites
    }

    pub fn num_instants(&self) -> usize {
        self.num_instants
    }

    /// Total number of samples, i.e. `num_satellites * num_instants`.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vector3<f64>] {
        &self.velocities
    }

    pub fn errors(&self) -> &[Option<PropagationErrorKind>] {
        &self.errors
    }

    /// Integer error code of the sample at this flat index, zero meaning success.
    pub fn error_code(&self, index: usize) -> u8 {
        self.errors[index].map_or(0, |kind| kind.code())
    }

    pub fn diagnostics(&self) -> &PropagationDiagnostics {
        &self.diagnostics
    }

    /// Flat index of the sample of satellite `satellite` at instant `instant`.
    pub fn flat_index(&self, satellite: usize, instant: usize) -> usize {
        satellite * self.num_instants + instant
    }

    /// Satellite index and instant index of the sample at this flat index.
    pub fn split_index(&self, index: usize) -> (usize, usize) {
        (index / self.num_instants, index % self.num_instants)
    }
}

/// Evaluates SGP4 for every satellite of a set at every instant of a time grid, in one call.
#[derive(Copy, Clone, Debug)]
pub struct BatchPropagator {
    /// Samples closer than this to the center of the Earth are flagged as decayed, in km
    pub decay_radius_km: f64,
}

impl Default for BatchPropagator {
    fn default() -> Self {
        Self {
            decay_radius_km: sgp4::WGS72.ae,
        }
    }
}

struct SatelliteTrack {
    errors: Vec<Option<PropagationErrorKind>>,
    positions: Vec<Vector3<f64>>,
    velocities: Vec<Vector3<f64>>,
}

impl BatchPropagator {
    /// Propagates the whole set over the whole grid.
    ///
    /// Satellites are evaluated on the current rayon thread pool and the result is assembled in
    /// input order. A sample which fails has its error kind set and non-finite position and
    /// velocity; failures never abort the batch.
    pub fn propagate(&self, satellites: &SatelliteSet, grid: &TimeGrid) -> PropagationBatch {
        let start = StdInstant::now();

        let tracks = satellites
            .records()
            .par_iter()
            .map(|record| self.propagate_record(record, grid))
            .collect::<Vec<SatelliteTrack>>();

        let num_samples = satellites.len() * grid.len();
        let mut errors = Vec::with_capacity(num_samples);
        let mut positions = Vec::with_capacity(num_samples);
        let mut velocities = Vec::with_capacity(num_samples);
        let mut diagnostics = PropagationDiagnostics::default();

        for track in tracks {
            for kind in track.errors.iter().flatten() {
                diagnostics.record(*kind);
            }
            errors.extend(track.errors);
            positions.extend(track.positions);
            velocities.extend(track.velocities);
        }

        info!(
            "propagated {} satellites over {} instants in {}",
            satellites.len(),
            grid.len(),
            start.elapsed().as_secs_f64() * Unit::Second
        );

        PropagationBatch {
            num_satellites: satellites.len(),
            num_instants: grid.len(),
            errors,
            positions,
            velocities,
            diagnostics,
        }
    }

    fn propagate_record(&self, record: &SatelliteRecord, grid: &TimeGrid) -> SatelliteTrack {
        let mut track = SatelliteTrack {
            errors: Vec::with_capacity(grid.len()),
            positions: Vec::with_capacity(grid.len()),
            velocities: Vec::with_capacity(grid.len()),
        };

        let epoch_days = record.epoch_days_since_j2000();
        let init_failure = record
            .init_error()
            .map(PropagationErrorKind::from_elements_error);

        for (jd, fr) in grid.iter() {
            let (error, position, velocity) = match record.constants() {
                None => (init_failure, nan_vector(), nan_vector()),
                Some(constants) => {
                    // Subtract the large terms first to keep the sub-minute precision.
                    let minutes = ((jd - J2000_JD) - epoch_days + fr) * MINUTES_PER_DAY;
                    self.evaluate(constants, minutes)
                }
            };
            track.errors.push(error);
            track.positions.push(position);
            track.velocities.push(velocity);
        }

        track
    }

    fn evaluate(
        &self,
        constants: &sgp4::Constants,
        minutes_since_epoch: f64,
    ) -> (Option<PropagationErrorKind>, Vector3<f64>, Vector3<f64>) {
        match constants.propagate(sgp4::MinutesSinceEpoch(minutes_since_epoch)) {
            Ok(prediction) => {
                let position = Vector3::from(prediction.position);
                if position.norm() < self.decay_radius_km {
                    (
                        Some(PropagationErrorKind::Decayed),
                        nan_vector(),
                        nan_vector(),
                    )
                } else {
                    (None, position, Vector3::from(prediction.velocity))
                }
            }
            Err(e) => (
                Some(PropagationErrorKind::from_sgp4(&e)),
                nan_vector(),
                nan_vector(),
            ),
        }
    }
}
