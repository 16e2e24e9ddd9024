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

use crate::cosmic::{convert_batch, GroundSample};
use crate::linalg::Vector3;
use crate::region::RegionPolygon;
use crate::time::Unit;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};
use snafu::prelude::*;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant as StdInstant;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ChunkError {
    #[snafu(display("at least one worker is required"))]
    NoWorkers,
    #[snafu(display("could not build the worker pool: {source}"))]
    ThreadPool { source: ThreadPoolBuildError },
    #[snafu(display("worker processing chunk #{chunk} failed: {message}"))]
    WorkerPanicked { chunk: usize, message: String },
}

/// Splits the propagated positions into fixed-stride chunks and processes them on a pool of
/// `worker_count` threads.
///
/// Results are always reassembled in chunk order, so the output of a run does not depend on the
/// number of workers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChunkCoordinator {
    worker_count: usize,
    progress: bool,
}

impl ChunkCoordinator {
    pub fn new(worker_count: usize) -> Result<Self, ChunkError> {
        ensure!(worker_count > 0, NoWorkersSnafu);
        Ok(Self {
            worker_count,
            progress: false,
        })
    }

    /// Shows a progress bar over the chunks while processing them.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Number of positions per chunk, never zero.
    pub fn chunk_size(&self, len: usize) -> usize {
        (len / self.worker_count).max(1)
    }

    /// Runs `op` on a thread pool of `worker_count` threads, which is torn down on return.
    ///
    /// Every rayon parallel iterator used inside `op` runs on this pool.
    pub fn install<OP, R>(&self, op: OP) -> Result<R, ChunkError>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.worker_count)
            .thread_name(|i| format!("groundtrack-worker-{i}"))
            .build()
            .context(ThreadPoolSnafu)?;

        Ok(pool.install(op))
    }

    /// Converts and filters the positions on a dedicated pool.
    ///
    /// Each returned sample carries its index in `positions`.
    pub fn run(
        &self,
        positions: &[Vector3<f64>],
        region: &RegionPolygon,
    ) -> Result<Vec<GroundSample>, ChunkError> {
        self.install(|| {
            self.run_with(positions, |offset, chunk| {
                process_chunk(offset, chunk, region)
            })
        })?
    }

    /// Applies `worker` to every chunk on the current rayon pool and concatenates the results in
    /// chunk order.
    ///
    /// The worker receives the offset of the chunk in `positions` and the chunk itself. All chunks
    /// are processed to completion: if any worker panics, the first failed chunk is reported and
    /// no partial result is returned.
    pub fn run_with<T, F>(&self, positions: &[Vector3<f64>], worker: F) -> Result<Vec<T>, ChunkError>
    where
        T: Send,
        F: Fn(usize, &[Vector3<f64>]) -> Vec<T> + Sync,
    {
        if positions.is_empty() {
            return Ok(Vec::new());
        }

        let start = StdInstant::now();
        let chunk_size = self.chunk_size(positions.len());
        let chunks: Vec<(usize, &[Vector3<f64>])> =
            positions.chunks(chunk_size).enumerate().collect();

        debug!(
            "{} positions in {} chunks of {} on {} workers",
            positions.len(),
            chunks.len(),
            chunk_size,
            self.worker_count
        );

        let pb = self.progress_bar(chunks.len());

        let outcomes = chunks
            .par_iter()
            .progress_with(pb)
            .map(|(chunk_no, chunk)| {
                panic::catch_unwind(AssertUnwindSafe(|| worker(chunk_no * chunk_size, chunk)))
                    .map_err(|payload| ChunkError::WorkerPanicked {
                        chunk: *chunk_no,
                        message: panic_message(payload),
                    })
            })
            .collect::<Vec<Result<Vec<T>, ChunkError>>>();

        let mut rslt = Vec::new();
        for outcome in outcomes {
            rslt.extend(outcome?);
        }

        info!(
            "processed {} chunks in {}",
            chunks.len(),
            start.elapsed().as_secs_f64() * Unit::Second
        );

        Ok(rslt)
    }

    // Just the template for the progress bar
    fn progress_bar(&self, num_chunks: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(num_chunks as u64);
        match ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:100.cyan/blue} {pos:>7}/{len:7} {msg}",
        ) {
            Ok(style) => pb.set_style(style.progress_chars("##-")),
            Err(e) => warn!("default progress bar style: {e}"),
        }
        pb.set_message(format!("{self}"));
        pb
    }
}

impl fmt::Display for ChunkCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ground track over {} workers", self.worker_count)
    }
}

/// Converts one chunk of positions to geodetic coordinates and keeps the samples inside the region.
///
/// `offset` is the index of the first position of the chunk in the whole batch.
pub fn process_chunk(
    offset: usize,
    chunk: &[Vector3<f64>],
    region: &RegionPolygon,
) -> Vec<GroundSample> {
    let samples = convert_batch(chunk)
        .into_iter()
        .enumerate()
        .map(|(i, coords)| GroundSample::new(offset + i, coords))
        .collect();

    region.filter(samples)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
