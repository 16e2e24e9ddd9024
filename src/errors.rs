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

use crate::executor::ChunkError;
use crate::io::{ConfigError, InputOutputError};
use crate::region::RegionError;
use crate::time_grid::DateError;
use crate::tle::TleError;

/// Groundtrack will (almost) never panic and functions which may fail will return an error.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum GroundTrackError {
    #[snafu(display("invalid target date: {source}"))]
    TargetDate { source: DateError },
    #[snafu(display("could not load satellites: {source}"))]
    SatelliteSet { source: TleError },
    #[snafu(display("invalid region: {source}"))]
    Region { source: RegionError },
    #[snafu(display("ground track processing failed: {source}"))]
    Chunking { source: ChunkError },
    #[snafu(display("{source}"))]
    InputOutput { source: InputOutputError },
    #[snafu(display("{source}"))]
    Config { source: ConfigError },
}

impl From<DateError> for GroundTrackError {
    fn from(source: DateError) -> Self {
        Self::TargetDate { source }
    }
}

impl From<TleError> for GroundTrackError {
    fn from(source: TleError) -> Self {
        Self::SatelliteSet { source }
    }
}

impl From<RegionError> for GroundTrackError {
    fn from(source: RegionError) -> Self {
        Self::Region { source }
    }
}

impl From<ChunkError> for GroundTrackError {
    fn from(source: ChunkError) -> Self {
        Self::Chunking { source }
    }
}

impl From<InputOutputError> for GroundTrackError {
    fn from(source: InputOutputError) -> Self {
        Self::InputOutput { source }
    }
}

impl From<ConfigError> for GroundTrackError {
    fn from(source: ConfigError) -> Self {
        Self::Config { source }
    }
}
