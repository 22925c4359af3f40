//! Input path resolution.

use std::path::PathBuf;

use crate::utils::expand_tilde;

/// Where the processed paths came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Given on the command line; passed through even if missing.
    Explicit,
    /// Default candidates, already filtered to existing files.
    Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    pub source: InputSource,
    pub paths: Vec<PathBuf>,
}

impl ResolvedInputs {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Pick the paths to process.
///
/// Explicit paths are kept verbatim (after `~` expansion) so a missing file
/// is reported as a per-file failure. Without explicit paths, only the
/// default candidates that exist as files are returned.
pub fn resolve_inputs(explicit: &[PathBuf], defaults: &[PathBuf]) -> ResolvedInputs {
    if !explicit.is_empty() {
        return ResolvedInputs {
            source: InputSource::Explicit,
            paths: explicit.iter().map(|p| expand_tilde(p)).collect(),
        };
    }

    let paths = defaults
        .iter()
        .map(|p| expand_tilde(p))
        .filter(|p| p.is_file())
        .collect();
    ResolvedInputs {
        source: InputSource::Defaults,
        paths,
    }
}
