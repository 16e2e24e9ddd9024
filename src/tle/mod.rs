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

use snafu::prelude::*;
use std::fmt;

/// Days in a Julian year, as used by [`sgp4::Elements::epoch`].
const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

/// Number of text lines in one TLE record: the name line and the two element lines.
pub const LINES_PER_RECORD: usize = 3;

#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TleError {
    #[snafu(display("TLE record #{index} (`{name}`) has malformed element lines: {details}"))]
    MalformedElements {
        index: usize,
        name: String,
        details: String,
    },
}

/// Orbital elements of a single satellite, parsed from the element lines of a TLE.
///
/// The SGP4 constants are initialised once when the record is built. If the model rejects the
/// elements, the record is kept so that indexing stays aligned with the input, and every sample
/// of this satellite will be reported as a propagation error.
pub struct SatelliteRecord {
    elements: sgp4::Elements,
    /// SGP4 constants, or why the model rejected the elements
    constants: Result<sgp4::Constants, sgp4::ElementsError>,
}

impl SatelliteRecord {
    /// Parses the two element lines of a TLE. The name is only kept as a label.
    pub fn from_tle(
        index: usize,
        name: &str,
        line1: &str,
        line2: &str,
    ) -> Result<Self, TleError> {
        let name = name.trim();
        let label = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };

        let elements = sgp4::Elements::from_tle(label, line1.as_bytes(), line2.as_bytes())
            .map_err(|e| TleError::MalformedElements {
                index,
                name: name.to_string(),
                details: format!("{e:?}"),
            })?;

        let record = Self::from_elements(elements);
        if let Some(reason) = record.init_error() {
            warn!("SGP4 rejected the elements of TLE record #{index} (`{name}`): {reason}");
        }

        Ok(record)
    }

    /// Initialises SGP4 from already parsed elements.
    pub fn from_elements(elements: sgp4::Elements) -> Self {
        let constants = sgp4::Constants::from_elements(&elements);

        Self {
            elements,
            constants,
        }
    }

    pub fn name(&self) -> &str {
        self.elements.object_name.as_deref().unwrap_or("UNKNOWN")
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    pub fn elements(&self) -> &sgp4::Elements {
        &self.elements
    }

    /// Returns the SGP4 constants, or None if the model could not be initialised.
    pub fn constants(&self) -> Option<&sgp4::Constants> {
        self.constants.as_ref().ok()
    }

    /// Reason why SGP4 could not be initialised for this record, if it failed.
    pub fn init_error(&self) -> Option<&sgp4::ElementsError> {
        self.constants.as_ref().err()
    }

    /// Epoch of the elements, in days past J2000 (JD 2451545.0).
    pub fn epoch_days_since_j2000(&self) -> f64 {
        self.elements.epoch() * DAYS_PER_JULIAN_YEAR
    }
}

impl fmt::Debug for SatelliteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SatelliteRecord")
            .field("name", &self.name())
            .field("norad_id", &self.norad_id())
            .field("initialized", &self.constants.is_ok())
            .finish()
    }
}

/// Ordered collection of satellites, index-aligned with the TLE records of the input.
#[derive(Debug, Default)]
pub struct SatelliteSet {
    records: Vec<SatelliteRecord>,
}

impl SatelliteSet {
    /// Builds the set from concatenated three-line TLE records.
    ///
    /// Lines are grouped by three (name, line 1, line 2). A trailing group with fewer than three
    /// lines is not a record and is skipped without error.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, TleError> {
        let groups = lines.chunks_exact(LINES_PER_RECORD);
        let leftover = groups.remainder().len();

        let records = groups
            .enumerate()
            .map(|(index, group)| {
                SatelliteRecord::from_tle(
                    index,
                    group[0].as_ref(),
                    group[1].as_ref(),
                    group[2].as_ref(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        if leftover > 0 {
            debug!("ignoring {leftover} trailing line(s) which do not form a full TLE record");
        }

        Ok(Self { records })
    }

    /// Builds the set from raw TLE text, trimming each line.
    pub fn parse(text: &str) -> Result<Self, TleError> {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        Self::from_lines(&lines)
    }

    /// Builds the set from records in the provided order.
    pub fn from_records(records: Vec<SatelliteRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SatelliteRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&SatelliteRecord> {
        self.records.get(index)
    }
}
