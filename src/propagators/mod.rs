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

use std::collections::BTreeMap;
use std::fmt;

mod batch;
pub use batch::{BatchPropagator, PropagationBatch};

/// Fixed vocabulary of the SGP4 propagation errors, indexed by their historical integer code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropagationErrorKind {
    MeanEccentricity,
    MeanMotion,
    PerturbedEccentricity,
    SemiLatusRectum,
    Suborbital,
    Decayed,
}

impl PropagationErrorKind {
    /// All error kinds, in code order.
    pub const ALL: [Self; 6] = [
        Self::MeanEccentricity,
        Self::MeanMotion,
        Self::PerturbedEccentricity,
        Self::SemiLatusRectum,
        Self::Suborbital,
        Self::Decayed,
    ];

    /// Integer code of this error, zero being reserved for success.
    pub fn code(&self) -> u8 {
        match self {
            Self::MeanEccentricity => 1,
            Self::MeanMotion => 2,
            Self::PerturbedEccentricity => 3,
            Self::SemiLatusRectum => 4,
            Self::Suborbital => 5,
            Self::Decayed => 6,
        }
    }

    /// Returns the error kind for this code, or None for zero and unknown codes.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::MeanEccentricity => "mean eccentricity is outside the range 0 <= e < 1.",
            Self::MeanMotion => "mean motion has fallen below zero.",
            Self::PerturbedEccentricity => {
                "perturbed eccentricity is outside the range 0 <= e <= 1."
            }
            Self::SemiLatusRectum => "semilatus rectum has fallen below zero.",
            Self::Suborbital => "(unused)",
            Self::Decayed => "mrt is less than 1.0 which indicates the satellite has decayed",
        }
    }

    /// Maps a propagation error of the SGP4 model onto the error vocabulary.
    pub(crate) fn from_sgp4(error: &sgp4::Error) -> Self {
        match error {
            sgp4::Error::OutOfRangeEccentricity { .. } => Self::MeanEccentricity,
            sgp4::Error::OutOfRangePerturbedEccentricity { .. } => Self::PerturbedEccentricity,
            sgp4::Error::NegativeSemiLatusRectum { .. } => Self::SemiLatusRectum,
        }
    }

    /// Maps an initialisation error of the SGP4 model onto the error vocabulary.
    pub fn from_elements_error(error: &sgp4::ElementsError) -> Self {
        match error {
            sgp4::ElementsError::OutOfRangeEpochEccentricity(_) => Self::MeanEccentricity,
            sgp4::ElementsError::KozaiElementsError(_) => Self::MeanMotion,
        }
    }
}

impl fmt::Display for PropagationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {}", self.code(), self.description())
    }
}

/// Summary of the propagation errors of a batch: how many samples failed with each distinct kind.
///
/// This is returned next to the positions and does not replace them: the failed samples are
/// still part of the batch, with non-finite positions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropagationDiagnostics {
    counts: BTreeMap<PropagationErrorKind, usize>,
}

impl PropagationDiagnostics {
    pub fn record(&mut self, kind: PropagationErrorKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Merges the diagnostics of another batch into this one.
    pub fn merge(&mut self, other: &Self) {
        for (kind, count) in &other.counts {
            *self.counts.entry(*kind).or_insert(0) += count;
        }
    }

    /// True if no sample failed.
    pub fn is_clean(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct error kinds encountered, in code order.
    pub fn kinds(&self) -> impl Iterator<Item = PropagationErrorKind> + '_ {
        self.counts.keys().copied()
    }

    /// Number of samples which failed with this error kind.
    pub fn count(&self, kind: PropagationErrorKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total number of failed samples.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl fmt::Display for PropagationDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "no propagation errors");
        }
        for (i, (kind, count)) in self.counts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{kind} ({count} samples)")?;
        }
        Ok(())
    }
}
