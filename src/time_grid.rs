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

use crate::time::{Epoch, Unit};
use snafu::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Number of one-minute samples in a UTC day.
pub const MINUTES_PER_DAY: usize = 24 * 60;

#[derive(Clone, Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DateError {
    #[snafu(display("{year:04}-{month:02}-{day:02} is not a valid calendar date"))]
    InvalidDate { year: i32, month: u8, day: u8 },
    #[snafu(display("`{input}` is not a date in YYYY-MM-DD format"))]
    InvalidFormat { input: String },
}

/// A civil calendar day, always interpreted in UTC.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Builds a new calendar date, checking that it exists in the Gregorian calendar.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        Epoch::maybe_from_gregorian_utc(year, month, day, 0, 0, 0, 0)
            .map_err(|_| DateError::InvalidDate { year, month, day })?;

        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Epoch of 00:00:00 UTC on this day.
    pub fn midnight(&self) -> Epoch {
        Epoch::from_gregorian_utc_at_midnight(self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let parts: Vec<&str> = input.split('-').collect();
        if parts.len() != 3 {
            return InvalidFormatSnafu { input }.fail();
        }

        let year = parts[0].parse::<i32>();
        let month = parts[1].parse::<u8>();
        let day = parts[2].parse::<u8>();

        match (year, month, day) {
            (Ok(year), Ok(month), Ok(day)) if parts[0].len() == 4 => Self::new(year, month, day),
            _ => InvalidFormatSnafu { input }.fail(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Evaluation instants of one UTC day at one-minute resolution.
///
/// Each instant is stored as a Julian date / fractional day pair, as expected by SGP4 batch
/// evaluation: `jd` is the Julian date of midnight UTC (so it always ends in `.5`) and `fr` is the
/// fraction of the day elapsed since then. Keeping them split avoids losing the sub-second part of
/// the instant in the ~2.4 million days of the Julian date.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeGrid {
    date: CalendarDate,
    start: Epoch,
    jd: Vec<f64>,
    fr: Vec<f64>,
}

impl TimeGrid {
    /// Builds the 1440 instants from 00:00 to 23:59 UTC of the provided day.
    pub fn for_day(date: CalendarDate) -> Self {
        let start = date.midnight();
        // Snap to the half day: hifitime may leave a few ULPs on the JDE of midnight.
        let jd_midnight = (start.to_jde_utc_days() - 0.5).round() + 0.5;

        let jd = vec![jd_midnight; MINUTES_PER_DAY];
        let fr = (0..MINUTES_PER_DAY)
            .map(|minute| minute as f64 / MINUTES_PER_DAY as f64)
            .collect();

        Self {
            date,
            start,
            jd,
            fr,
        }
    }

    pub fn date(&self) -> CalendarDate {
        self.date
    }

    pub fn len(&self) -> usize {
        self.jd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jd.is_empty()
    }

    /// Julian dates of each instant, aligned with [`TimeGrid::fr`].
    pub fn jd(&self) -> &[f64] {
        &self.jd
    }

    /// Fractional days of each instant, aligned with [`TimeGrid::jd`].
    pub fn fr(&self) -> &[f64] {
        &self.fr
    }

    /// Iterates over the (jd, fr) pairs in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.jd.iter().copied().zip(self.fr.iter().copied())
    }

    /// Returns the epoch of the `index`-th instant.
    pub fn epoch(&self, index: usize) -> Epoch {
        self.start + (index as i64) * Unit::Minute
    }
}
