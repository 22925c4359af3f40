//! `nobg.toml` sections.
//!
//! # Example
//!
//! ```toml
//! [filter]
//! tolerance = 30          # distance below which a pixel becomes transparent
//! background = "#ffffff"  # also "255,255,255" or [255, 255, 255]
//!
//! [output]
//! suffix = "_transparent" # logo.jpg -> logo_transparent.png
//!
//! [inputs]
//! defaults = ["assets/images/logo.png"]
//! ```

use serde::Deserialize;
use std::path::PathBuf;

use crate::image::background::{BackgroundColor, DEFAULT_SUFFIX, DEFAULT_TOLERANCE};

/// `[filter]`: what counts as background.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Euclidean RGB distance threshold (0 to ~441.7 is meaningful).
    pub tolerance: f64,
    pub background: BackgroundColor,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            background: BackgroundColor::WHITE,
        }
    }
}

/// `[output]`: naming of derived output files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

/// `[inputs]`: candidates tried when no path is given on the command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputsConfig {
    /// Relative paths resolve against the current directory; `~` is expanded.
    pub defaults: Vec<PathBuf>,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            defaults: [
                "assets/images/logo.png",
                "assets/images/blogo.png",
                "frontend/public/assets/images/logo.png",
                "frontend/public/assets/images/blogo.png",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}
