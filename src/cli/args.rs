//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

use crate::image::background::BackgroundColor;

/// Make solid-color logo backgrounds transparent
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Images to process. If omitted, the default logo locations are tried
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::FilePath)]
    pub paths: Vec<PathBuf>,

    /// Color distance below which a pixel becomes transparent (default: 30)
    #[arg(short, long, allow_negative_numbers = true)]
    pub tolerance: Option<f64>,

    /// Background color to remove: #rrggbb, #rgb or r,g,b (default: #ffffff)
    #[arg(short, long, value_name = "COLOR")]
    pub background: Option<BackgroundColor>,

    /// Output file, only with a single input (extension is forced to .png)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Suffix inserted before the extension of derived output names (default: _transparent)
    #[arg(short, long)]
    pub suffix: Option<String>,

    /// Config file path (default: nobg.toml in the current directory, if present)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}
