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

extern crate clap;
extern crate dialoguer;
extern crate groundtrack;
extern crate log;
extern crate pretty_env_logger;

mod prompt;

use clap::{value_parser, Arg, ArgAction, Command};
use dialoguer::theme::ColorfulTheme;
use groundtrack::io::{read_lines, ConfigError, ConfigRepr, InputOutputError};
use groundtrack::pipeline::{run_from_lines, GroundTrackConfig};
use groundtrack::GroundTrackError;
use log::info;
use snafu::prelude::*;
use std::env::{set_var, var};
use std::path::PathBuf;

const LOG_VAR: &str = "GROUNDTRACK_LOG";

#[derive(Debug, Snafu)]
enum CliError {
    #[snafu(display("{source}"))]
    Read { source: InputOutputError },
    #[snafu(display("{source}"))]
    Config { source: ConfigError },
    #[snafu(display("could not read user input: {source}"))]
    Prompt { source: dialoguer::Error },
    #[snafu(display("{source}"))]
    Pipeline { source: GroundTrackError },
}

fn main() -> Result<(), CliError> {
    let app = Command::new("groundtrack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Finds where a set of satellites flies over a ground region during one UTC day.")
        .arg(
            Arg::new("TLE")
                .help("Sets the TLE file to use, three lines per satellite")
                .required(true)
                .index(1)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("YAML")
                .value_parser(value_parser!(PathBuf))
                .help("Reads the date and the region from this file instead of prompting for them"),
        )
        .arg(
            Arg::new("workers")
                .short('w')
                .long("workers")
                .value_name("COUNT")
                .value_parser(value_parser!(usize))
                .help("Number of worker threads, defaults to the available parallelism"),
        )
        .arg(
            Arg::new("progress")
                .short('p')
                .long("progress")
                .action(ArgAction::SetTrue)
                .help("Shows a progress bar while filtering"),
        );

    let matches = app.get_matches();

    if var(LOG_VAR).is_err() {
        set_var(LOG_VAR, "INFO");
    }

    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        println!("could not init logger");
    }

    // clap enforces the presence of the TLE argument
    let tle_path = matches
        .get_one::<PathBuf>("TLE")
        .cloned()
        .unwrap_or_default();
    let lines = read_lines(&tle_path).context(ReadSnafu)?;
    info!("Loaded {} lines from {}", lines.len(), tle_path.display());

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GroundTrackConfig::load(path).context(ConfigSnafu)?,
        None => {
            let theme = ColorfulTheme::default();
            let date = prompt::date(&theme).context(PromptSnafu)?;
            let region = prompt::region(&theme).context(PromptSnafu)?;
            GroundTrackConfig::builder().date(date).region(region).build()
        }
    };

    if let Some(workers) = matches.get_one::<usize>("workers") {
        config.worker_count = *workers;
    }
    if matches.get_flag("progress") {
        config.progress = true;
    }

    let report = run_from_lines(&config, &lines).context(PipelineSnafu)?;
    println!("{report}");

    Ok(())
}
