use std::path::{Path, PathBuf};

/// Suffix inserted before the extension of derived output names.
pub const DEFAULT_SUFFIX: &str = "_transparent";

const PNG_EXT: &str = "png";

/// Resolve where the processed image is written.
///
/// - explicit path: used as is, extension forced to `png`
/// - otherwise: `<dir>/<stem><suffix>.<ext>` next to the input, extension forced to `png`
///
/// An existing `png`/`PNG` extension is kept untouched.
pub fn output_path(input: &Path, explicit: Option<&Path>, suffix: &str) -> PathBuf {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => derive_from_input(input, suffix),
    };
    force_png(path)
}

fn derive_from_input(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "image".into());

    let mut name = format!("{stem}{suffix}");
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    input.with_file_name(name)
}

fn force_png(mut path: PathBuf) -> PathBuf {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(PNG_EXT));
    if !is_png {
        path.set_extension(PNG_EXT);
    }
    path
}
