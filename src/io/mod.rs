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

use crate::time_grid::CalendarDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use snafu::prelude::*;
use std::fmt::Debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum InputOutputError {
    #[snafu(display("could not read TLE file {}: {source}", path.display()))]
    ReadTle { path: PathBuf, source: io::Error },
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    #[snafu(display("failed to read configuration file: {source}"))]
    ReadError { source: io::Error },
    #[snafu(display("failed to parse YAML configuration: {source}"))]
    ParseError { source: serde_yaml::Error },
    #[snafu(display("failed to serialize configuration to YAML: {source}"))]
    SerializeError { source: serde_yaml::Error },
}

impl PartialEq for ConfigError {
    /// No two configuration errors match
    fn eq(&self, _other: &Self) -> bool {
        false
    }
}

pub trait ConfigRepr: Debug + Sized + Serialize + DeserializeOwned {
    /// Builds the configuration representation from the path to a yaml
    fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path).context(ReadSnafu)?;
        let reader = BufReader::new(file);

        serde_yaml::from_reader(reader).context(ParseSnafu)
    }

    /// Builds the configuration representation from the provided string of a yaml
    fn loads(data: &str) -> Result<Self, ConfigError> {
        debug!("Loading YAML:\n{data}");
        serde_yaml::from_str(data).context(ParseSnafu)
    }

    /// Serializes this configuration into a yaml string
    fn dumps(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).context(SerializeSnafu)
    }
}

/// Reads a text file line by line, trimming the surrounding whitespace of each line.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, InputOutputError> {
    let path = path.as_ref();
    let file = File::open(path).context(ReadTleSnafu { path })?;

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.context(ReadTleSnafu { path })?;
        lines.push(line.trim().to_string());
    }

    debug!("read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

pub(crate) fn date_to_str<S>(date: &CalendarDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{date}"))
}

/// A deserializer from a YYYY-MM-DD string
pub(crate) fn date_from_str<'de, D>(deserializer: D) -> Result<CalendarDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    CalendarDate::from_str(&s).map_err(serde::de::Error::custom)
}
