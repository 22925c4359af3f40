//! nobg - make solid-color logo backgrounds transparent.

mod cli;
mod config;
mod image;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{
    Cli,
    process::{Outcome, run},
};
use config::NobgConfig;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = NobgConfig::load(&cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }

    match run(&cli, &config)? {
        // per-file failures are already reported; the exit code stays 0
        Outcome::Completed(report) => {
            debug!("nobg"; "{} written, {} failed", report.succeeded.len(), report.failed.len());
            Ok(ExitCode::SUCCESS)
        }
        Outcome::NoInputs => Ok(ExitCode::from(1)),
    }
}
