//! Batch orchestration.
//!
//! Phases:
//! - **Resolve** - explicit paths or existing default candidates
//! - **Announce** - list inputs and effective settings
//! - **Process** - one file at a time, failures reported and skipped
//! - **Summary** - written outputs, failed inputs, next steps

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::CommandFactory;

use crate::{
    cli::{
        Cli,
        inputs::{InputSource, resolve_inputs},
    },
    config::{DEFAULT_CONFIG_FILE, NobgConfig},
    image::background::{FilterOptions, make_transparent},
    log,
    logger::{self, ProgressLine},
    utils::plural_count,
};

/// Per-file results of one batch, both in input order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Output paths that were written.
    pub succeeded: Vec<PathBuf>,
    /// Input paths that produced no output.
    pub failed: Vec<PathBuf>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Batch ran (individual files may still have failed).
    Completed(BatchReport),
    /// No candidate file was found.
    NoInputs,
}

/// Run the tool for parsed CLI arguments and loaded config.
pub fn run(cli: &Cli, config: &NobgConfig) -> Result<Outcome> {
    let inputs = resolve_inputs(&cli.paths, &config.inputs.defaults);
    if inputs.is_empty() {
        print_no_inputs(config);
        return Ok(Outcome::NoInputs);
    }

    if cli.output.is_some() && inputs.paths.len() != 1 {
        bail!(
            "--output needs exactly one input image, got {}",
            inputs.paths.len()
        );
    }

    let options = config.filter_options();
    print_plan(&inputs.paths, inputs.source, &options);

    let report = process_files(
        &inputs.paths,
        cli.output.as_deref(),
        &options,
        &config.output.suffix,
    );
    print_summary(&report);
    Ok(Outcome::Completed(report))
}

/// Process every input in order; one failure never stops the batch.
pub fn process_files(
    inputs: &[PathBuf],
    output: Option<&Path>,
    options: &FilterOptions,
    suffix: &str,
) -> BatchReport {
    let progress = ProgressLine::new("nobg", &[("images", inputs.len())]);
    let mut report = BatchReport::default();

    for input in inputs {
        log!("nobg"; "processing {}", input.display());
        match make_transparent(input, output, options, suffix) {
            Some(path) => report.succeeded.push(path),
            None => report.failed.push(input.clone()),
        }
        progress.inc("images");
    }

    progress.finish();
    report
}

fn print_plan(inputs: &[PathBuf], source: InputSource, options: &FilterOptions) {
    let origin = match source {
        InputSource::Explicit => "",
        InputSource::Defaults => " in default locations",
    };
    log!("nobg"; "found {}{}:", plural_count(inputs.len(), "image"), origin);
    for input in inputs {
        println!("  - {}", input.display());
    }
    log!("nobg"; "tolerance: {}, background: {}", options.tolerance, options.background);
}

fn print_summary(report: &BatchReport) {
    if report.succeeded.is_empty() {
        log!("error"; "failed to process {}", plural_count(report.total(), "image"));
        for input in &report.failed {
            logger::item_failed(&input.display().to_string());
        }
        eprintln!();
        eprintln!("Make sure each file exists and is a supported image (PNG, JPEG, WebP, BMP, GIF).");
        return;
    }

    log!(
        "done";
        "{} of {} written",
        plural_count(report.succeeded.len(), "image"),
        report.total()
    );
    for output in &report.succeeded {
        logger::item_ok(&output.display().to_string());
    }
    for input in &report.failed {
        logger::item_failed(&input.display().to_string());
    }

    println!();
    println!("Next steps:");
    println!("  1. Review the new transparent files");
    println!("  2. Replace the originals if they look good");
    println!("  3. Point your code at the transparent versions");
}

fn print_no_inputs(config: &NobgConfig) {
    log!("error"; "no images found in default locations");
    for candidate in &config.inputs.defaults {
        eprintln!("- {}", candidate.display());
    }
    eprintln!();
    eprintln!("{}", Cli::command().render_usage());
    eprintln!();
    eprintln!(
        "Or list your files under `[inputs] defaults` in {}",
        DEFAULT_CONFIG_FILE
    );
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;
    use image::{ImageFormat, Rgba, RgbaImage};
    use tempfile::TempDir;

    use super::*;
    use crate::image::background::DEFAULT_SUFFIX;

    fn write_logo(dir: &Path, name: &str) -> PathBuf {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        let path = dir.join(name);
        img.save_with_format(&path, ImageFormat::Png).unwrap();
        path
    }

    fn config_with_defaults(defaults: Vec<PathBuf>) -> NobgConfig {
        let mut config = NobgConfig::default();
        config.inputs.defaults = defaults;
        config
    }

    #[test]
    fn batch_skips_failed_file_and_keeps_order() {
        let dir = TempDir::new().unwrap();
        let first = write_logo(dir.path(), "first.png");
        let broken = dir.path().join("broken.png");
        fs::write(&broken, b"not a png").unwrap();
        let third = write_logo(dir.path(), "third.png");

        let report = process_files(
            &[first, broken.clone(), third],
            None,
            &FilterOptions::default(),
            DEFAULT_SUFFIX,
        );

        assert_eq!(
            report.succeeded,
            [
                dir.path().join("first_transparent.png"),
                dir.path().join("third_transparent.png")
            ]
        );
        assert_eq!(report.failed, [broken]);
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn batch_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.png");

        let report = process_files(
            std::slice::from_ref(&missing),
            None,
            &FilterOptions::default(),
            DEFAULT_SUFFIX,
        );
        assert!(report.succeeded.is_empty());
        assert_eq!(report.failed, [missing]);
    }

    #[test]
    fn run_without_inputs_reports_no_inputs() {
        let dir = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["nobg"]).unwrap();
        let config = config_with_defaults(vec![dir.path().join("logo.png")]);

        let outcome = run(&cli, &config).unwrap();
        assert!(matches!(outcome, Outcome::NoInputs));
    }

    #[test]
    fn run_uses_existing_defaults() {
        let dir = TempDir::new().unwrap();
        let logo = write_logo(dir.path(), "logo.png");
        let cli = Cli::try_parse_from(["nobg"]).unwrap();
        let config = config_with_defaults(vec![dir.path().join("absent.png"), logo]);

        let Outcome::Completed(report) = run(&cli, &config).unwrap() else {
            panic!("expected a completed batch");
        };
        assert_eq!(report.succeeded, [dir.path().join("logo_transparent.png")]);
        assert!(report.failed.is_empty());
    }

    #[test]
    fn run_with_explicit_output() {
        let dir = TempDir::new().unwrap();
        let logo = write_logo(dir.path(), "logo.png");
        let out = dir.path().join("out.webp");

        let cli = Cli::try_parse_from([
            "nobg".to_string(),
            logo.to_string_lossy().into_owned(),
            "-o".to_string(),
            out.to_string_lossy().into_owned(),
        ])
        .unwrap();
        let config = NobgConfig::default();

        let Outcome::Completed(report) = run(&cli, &config).unwrap() else {
            panic!("expected a completed batch");
        };
        assert_eq!(report.succeeded, [dir.path().join("out.png")]);
    }

    #[test]
    fn run_rejects_output_with_many_inputs() {
        let cli = Cli::try_parse_from(["nobg", "a.png", "b.png", "-o", "out.png"]).unwrap();
        assert!(run(&cli, &NobgConfig::default()).is_err());
    }
}
