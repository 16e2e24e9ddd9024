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
use crate::errors::GroundTrackError;
use crate::executor::{process_chunk, ChunkCoordinator, ChunkError};
use crate::io::{date_from_str, date_to_str, read_lines, ConfigRepr};
use crate::propagators::{BatchPropagator, PropagationDiagnostics};
use crate::region::{LatLon, RegionPolygon};
use crate::time::{Duration, Epoch, Unit};
use crate::time_grid::{CalendarDate, TimeGrid};
use crate::tle::SatelliteSet;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;
use std::thread::available_parallelism;
use std::time::Instant as StdInstant;
use typed_builder::TypedBuilder;

/// Number of threads the host can run in parallel, or one if unknown.
pub fn default_worker_count() -> usize {
    available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
}

/// Everything needed to compute a ground track, besides the satellites themselves.
///
/// Can be loaded from YAML:
///
/// ```yaml
/// date: 2023-06-01
/// region:
///   - lat: -10.0
///     lon: 100.0
///   - lat: 10.0
///     lon: 100.0
///   - lat: 10.0
///     lon: 120.0
/// worker_count: 4
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct GroundTrackConfig {
    /// UTC day to propagate over, serialized as YYYY-MM-DD
    #[serde(serialize_with = "date_to_str", deserialize_with = "date_from_str")]
    pub date: CalendarDate,
    /// Vertices of the region, as latitude/longitude pairs in degrees
    pub region: Vec<LatLon>,
    /// Number of worker threads, defaults to the available parallelism of the host
    #[builder(default = default_worker_count())]
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
    /// Set to true to show a progress bar over the chunks
    #[builder(default)]
    #[serde(default)]
    pub progress: bool,
}

impl ConfigRepr for GroundTrackConfig {}

impl GroundTrackConfig {
    /// Checks this configuration and returns the region polygon to filter with.
    pub fn validate(&self) -> Result<RegionPolygon, GroundTrackError> {
        if self.worker_count == 0 {
            return Err(ChunkError::NoWorkers.into());
        }
        Ok(RegionPolygon::new(&self.region)?)
    }

    pub fn coordinator(&self) -> Result<ChunkCoordinator, ChunkError> {
        Ok(ChunkCoordinator::new(self.worker_count)?.with_progress(self.progress))
    }
}

/// Ground track samples which fell inside the region, with the propagation diagnostics.
#[derive(Clone, Debug)]
pub struct GroundTrackReport {
    /// Samples inside the region, in satellite then time order
    pub samples: Vec<GroundSample>,
    /// Errors encountered during propagation
    pub diagnostics: PropagationDiagnostics,
    /// Wall clock time from the first input line being read, or from the satellites being handed
    /// to [run], until the filtering completes
    pub elapsed: Duration,
    pub num_satellites: usize,
    pub num_instants: usize,
    /// Epoch of the first instant of the day
    pub start: Epoch,
    /// Satellite names, in input order
    pub names: Vec<String>,
}

impl GroundTrackReport {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index of the satellite this sample belongs to.
    pub fn satellite_of(&self, sample: &GroundSample) -> usize {
        sample.index / self.num_instants
    }

    /// Epoch of this sample.
    pub fn epoch_of(&self, sample: &GroundSample) -> Epoch {
        self.start + ((sample.index % self.num_instants) as i64) * Unit::Minute
    }
}

impl fmt::Display for GroundTrackReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Completed in {}", self.elapsed)?;
        if self.samples.is_empty() {
            return write!(f, "No data found");
        }
        writeln!(f, "{} samples found", self.samples.len())?;
        writeln!(
            f,
            "{:<8} {:<24} {:<30} {:>12} {:>12} {:>12}",
            "index", "satellite", "epoch", "lon (deg)", "lat (deg)", "alt (km)"
        )?;
        for sample in &self.samples {
            let name = self
                .names
                .get(self.satellite_of(sample))
                .map(String::as_str)
                .unwrap_or("");
            writeln!(
                f,
                "{:<8} {:<24} {:<30} {:>12.4} {:>12.4} {:>12.3}",
                sample.index,
                name,
                format!("{}", self.epoch_of(sample)),
                sample.longitude_deg(),
                sample.latitude_deg(),
                sample.altitude_km()
            )?;
        }
        Ok(())
    }
}

/// Propagates every satellite over the configured day and keeps the samples above the region.
///
/// Propagation and filtering both run on one worker pool built for this call.
/// The reported elapsed time starts when this function is called.
pub fn run(
    config: &GroundTrackConfig,
    satellites: &SatelliteSet,
) -> Result<GroundTrackReport, GroundTrackError> {
    run_since(config, satellites, StdInstant::now())
}

fn run_since(
    config: &GroundTrackConfig,
    satellites: &SatelliteSet,
    start: StdInstant,
) -> Result<GroundTrackReport, GroundTrackError> {
    let region = config.validate()?;
    let coordinator = config.coordinator()?;
    let grid = TimeGrid::for_day(config.date);

    info!(
        "computing ground track of {} satellites on {} over {region}",
        satellites.len(),
        config.date
    );

    let (samples, diagnostics) = coordinator.install(|| -> Result<_, ChunkError> {
        let batch = BatchPropagator::default().propagate(satellites, &grid);
        let samples = coordinator.run_with(batch.positions(), |offset, chunk| {
            process_chunk(offset, chunk, &region)
        })?;
        Ok((samples, batch.diagnostics().clone()))
    })??;
    let elapsed = start.elapsed().as_secs_f64() * Unit::Second;

    for kind in diagnostics.kinds() {
        warn!(
            "{} samples failed to propagate: {kind}",
            diagnostics.count(kind)
        );
    }

    info!("{} samples inside the region", samples.len());

    Ok(GroundTrackReport {
        samples,
        diagnostics,
        elapsed,
        num_satellites: satellites.len(),
        num_instants: grid.len(),
        start: grid.epoch(0),
        names: satellites
            .records()
            .iter()
            .map(|record| record.name().to_string())
            .collect(),
    })
}

/// Parses the TLE lines and runs the pipeline on them. The parsing is included in the elapsed time.
pub fn run_from_lines<S: AsRef<str>>(
    config: &GroundTrackConfig,
    lines: &[S],
) -> Result<GroundTrackReport, GroundTrackError> {
    lines_since(config, lines, StdInstant::now())
}

fn lines_since<S: AsRef<str>>(
    config: &GroundTrackConfig,
    lines: &[S],
    start: StdInstant,
) -> Result<GroundTrackReport, GroundTrackError> {
    let satellites = SatelliteSet::from_lines(lines)?;
    run_since(config, &satellites, start)
}

/// Reads the TLE file and runs the pipeline on it. Reading the file is included in the elapsed time.
pub fn run_from_file<P: AsRef<Path>>(
    config: &GroundTrackConfig,
    path: P,
) -> Result<GroundTrackReport, GroundTrackError> {
    let start = StdInstant::now();
    let lines = read_lines(path)?;
    lines_since(config, &lines, start)
}
