//! Per-file failure kinds.

use std::error::Error as _;
use std::path::PathBuf;

use image::ImageError;
use thiserror::Error;

/// Why a single image could not be made transparent.
///
/// Every variant is a per-file failure: the batch reports it and moves on.
#[derive(Debug, Error)]
pub enum NobgError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot decode `{}`", .0.display())]
    Decode(PathBuf, #[source] ImageError),

    #[error("cannot write `{}`", .0.display())]
    Encode(PathBuf, #[source] ImageError),

    #[error("IO error on `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("refusing to overwrite input `{}`", .0.display())]
    OverwriteInput(PathBuf),
}

impl NobgError {
    /// Error message followed by its source chain, one cause per line.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Error, ErrorKind};

    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = NobgError::NotFound(PathBuf::from("logo.png"));
        assert_eq!(err.to_string(), "file not found: logo.png");
        assert_eq!(err.report(), "file not found: logo.png");
    }

    #[test]
    fn test_report_includes_source() {
        let err = NobgError::Io(
            PathBuf::from("out/logo.png"),
            Error::new(ErrorKind::PermissionDenied, "permission denied"),
        );

        let report = err.report();
        assert!(report.starts_with("IO error on `out/logo.png`"));
        assert!(report.contains("caused by: permission denied"));
    }
}
