//! Configuration management for `nobg.toml`.
//!
//! Values are layered: built-in defaults, then the config file (optional),
//! then command-line flags.
//!
//! # Sections
//!
//! | Section     | Purpose                                   |
//! |-------------|-------------------------------------------|
//! | `[filter]`  | Tolerance and background color            |
//! | `[output]`  | Suffix for derived output file names      |
//! | `[inputs]`  | Default candidate paths                   |

mod error;
mod section;

pub use error::ConfigError;
pub use section::{FilterConfig, InputsConfig, OutputConfig};

use crate::{cli::Cli, image::background::FilterOptions, log};
use anyhow::Result;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file looked up in the current directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "nobg.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing nobg.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NobgConfig {
    /// Config file actually loaded (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub inputs: InputsConfig,
}

impl NobgConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// An explicit `--config` must exist; the implicit `nobg.toml` is optional.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path.clone()).into());
                }
                Self::from_path(path)?
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_path(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {}, ignoring:", path.display());
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Command-line flags win over file values.
    fn apply_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.filter.tolerance, cli.tolerance.as_ref());
        Self::update_option(&mut self.filter.background, cli.background.as_ref());
        Self::update_option(&mut self.output.suffix, cli.suffix.as_ref());
    }

    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    pub fn validate(&self) -> Result<(), ConfigError> {
        let tolerance = self.filter.tolerance;
        // +inf is allowed and clears every pixel
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(ConfigError::Validation(format!(
                "filter.tolerance must be a non-negative number, got {tolerance}"
            )));
        }

        if self.output.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "output.suffix must not be empty (outputs would overwrite their inputs)".into(),
            ));
        }

        Ok(())
    }

    /// Per-call filter inputs.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            background: self.filter.background,
            tolerance: self.filter.tolerance,
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::background::BackgroundColor;
    use clap::Parser;

    fn parse(content: &str) -> NobgConfig {
        let (config, ignored) = NobgConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty(), "unknown fields: {ignored:?}");
        config
    }

    #[test]
    fn test_defaults() {
        let config = parse("");
        assert_eq!(config.filter.tolerance, 30.0);
        assert_eq!(config.filter.background, BackgroundColor::WHITE);
        assert_eq!(config.output.suffix, "_transparent");
        assert_eq!(config.inputs.defaults.len(), 4);
        assert_eq!(
            config.inputs.defaults[0],
            PathBuf::from("assets/images/logo.png")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            "[filter]\ntolerance = 12\nbackground = [240, 240, 240]\n\
             [output]\nsuffix = \".nobg\"\n\
             [inputs]\ndefaults = [\"a.png\", \"b.jpg\"]",
        );
        assert_eq!(config.filter.tolerance, 12.0);
        assert_eq!(config.filter.background, BackgroundColor::new(240, 240, 240));
        assert_eq!(config.output.suffix, ".nobg");
        assert_eq!(
            config.inputs.defaults,
            [PathBuf::from("a.png"), PathBuf::from("b.jpg")]
        );
    }

    #[test]
    fn test_parse_invalid_toml() {
        assert!(NobgConfig::parse_with_ignored("[filter\ntolerance = 1").is_err());
        assert!(NobgConfig::parse_with_ignored("[filter]\nbackground = \"#zzzzzz\"").is_err());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let (config, ignored) =
            NobgConfig::parse_with_ignored("[filter]\ntolerance = 5\ncolour = \"#fff\"").unwrap();
        assert_eq!(config.filter.tolerance, 5.0);
        assert!(ignored.iter().any(|f| f.contains("colour")));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = parse("[filter]\ntolerance = 12\n[output]\nsuffix = \"_x\"");
        let cli = Cli::try_parse_from(["nobg", "-t", "40", "-b", "#000"]).unwrap();
        config.apply_cli(&cli);

        assert_eq!(config.filter.tolerance, 40.0);
        assert_eq!(config.filter.background, BackgroundColor::new(0, 0, 0));
        // not given on the command line
        assert_eq!(config.output.suffix, "_x");

        let options = config.filter_options();
        assert_eq!(options.tolerance, 40.0);
        assert_eq!(options.background, BackgroundColor::new(0, 0, 0));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = NobgConfig::default();
        config.filter.tolerance = -1.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.filter.tolerance = f64::NAN;
        assert!(config.validate().is_err());

        config.filter.tolerance = f64::NEG_INFINITY;
        assert!(config.validate().is_err());

        config.filter.tolerance = 0.0;
        assert!(config.validate().is_ok());

        config.output.suffix.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_infinite_tolerance() {
        let mut config = NobgConfig::default();
        config.filter.tolerance = f64::INFINITY;
        assert!(config.validate().is_ok());

        let cli = Cli::try_parse_from(["nobg", "-t", "inf"]).unwrap();
        let mut config = NobgConfig::default();
        config.apply_cli(&cli);
        assert!(config.validate().is_ok());
        assert_eq!(config.filter_options().tolerance, f64::INFINITY);
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[filter]\ntolerance = 7").unwrap();

        let arg = path.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["nobg", "-C", arg.as_str()]).unwrap();
        let config = NobgConfig::load(&cli).unwrap();
        assert_eq!(config.filter.tolerance, 7.0);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let arg = dir.path().join("missing.toml").to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["nobg", "-C", arg.as_str()]).unwrap();

        let err = NobgConfig::load(&cli).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_rejects_negative_tolerance_flag() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nobg.toml");
        fs::write(&path, "").unwrap();

        let arg = path.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from(["nobg", "-C", arg.as_str(), "-t", "-3"]).unwrap();
        assert!(NobgConfig::load(&cli).is_err());
    }
}
