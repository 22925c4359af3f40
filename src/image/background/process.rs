use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageError, ImageFormat, ImageReader, RgbaImage};
use tempfile::{Builder, NamedTempFile};

use crate::image::background::error::NobgError;
use crate::image::background::filter::{FilterOptions, apply_transparency};
use crate::image::background::output::output_path;
use crate::{debug, log};

/// Make the background of one image file transparent and write PNG output.
///
/// Returns the path actually written. The input file is never modified.
pub fn remove_background(
    input: &Path,
    output: Option<&Path>,
    options: &FilterOptions,
    suffix: &str,
) -> Result<PathBuf, NobgError> {
    if !input.is_file() {
        return Err(NobgError::NotFound(input.to_path_buf()));
    }

    let target = output_path(input, output, suffix);
    if is_same_file(input, &target) {
        return Err(NobgError::OverwriteInput(target));
    }

    let img = decode(input)?;
    let (processed, cleared) = process_image(img, options);
    debug!("nobg"; "{}: cleared {} of {} pixels", input.display(), cleared, pixel_count(&processed));

    let created = create_parent_dirs(&target)?;
    let written = write_atomically(&target, |w| {
        DynamicImage::ImageRgba8(processed).write_to(w, ImageFormat::Png)
    });
    if written.is_err() {
        remove_created_dirs(&created);
    }
    written.map(|()| target)
}

/// Call boundary for the batch: reports the failure and yields `None` instead.
pub fn make_transparent(
    input: &Path,
    output: Option<&Path>,
    options: &FilterOptions,
    suffix: &str,
) -> Option<PathBuf> {
    match remove_background(input, output, options, suffix) {
        Ok(path) => {
            log!("nobg"; "saved {}", path.display());
            Some(path)
        }
        Err(e) => {
            log!("error"; "{}", e.report());
            None
        }
    }
}

/// Convert to RGBA (opaque alpha when the source has none) and clear the background.
pub fn process_image(img: DynamicImage, options: &FilterOptions) -> (RgbaImage, usize) {
    let mut output = img.into_rgba8();
    let cleared = apply_transparency(&mut output, options);
    (output, cleared)
}

/// Decode by content sniffing so a mislabelled extension still loads.
fn decode(input: &Path) -> Result<DynamicImage, NobgError> {
    let io_err = |e: std::io::Error| {
        if e.kind() == ErrorKind::NotFound {
            NobgError::NotFound(input.to_path_buf())
        } else {
            NobgError::Io(input.to_path_buf(), e)
        }
    };

    ImageReader::open(input)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?
        .decode()
        .map_err(|e| NobgError::Decode(input.to_path_buf(), e))
}

/// Create missing parent directories, returning the new ones deepest first.
fn create_parent_dirs(target: &Path) -> Result<Vec<PathBuf>, NobgError> {
    let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(Vec::new());
    };

    let missing: Vec<PathBuf> = parent
        .ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
        .map(Path::to_path_buf)
        .collect();
    fs::create_dir_all(parent).map_err(|e| NobgError::Io(parent.to_path_buf(), e))?;
    Ok(missing)
}

/// Best effort: only empty directories are removed.
fn remove_created_dirs(dirs: &[PathBuf]) {
    for dir in dirs {
        if fs::remove_dir(dir).is_err() {
            break;
        }
    }
}

/// Encode into a hidden sibling file and rename it over `target` on success.
///
/// On any failure the temporary file is deleted and `target` is left as it was.
fn write_atomically<F>(target: &Path, encode: F) -> Result<(), NobgError>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<(), ImageError>,
{
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = temp_file_in(dir).map_err(|e| NobgError::Io(dir.to_path_buf(), e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode(&mut writer).map_err(|e| NobgError::Encode(target.to_path_buf(), e))?;
        writer
            .flush()
            .map_err(|e| NobgError::Io(target.to_path_buf(), e))?;
    }

    tmp.persist(target)
        .map_err(|e| NobgError::Io(target.to_path_buf(), e.error))?;
    Ok(())
}

fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".nobg-").suffix(".tmp");
    // umask applies, so outputs get the usual 0644 rather than 0600
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

fn is_same_file(input: &Path, target: &Path) -> bool {
    match (fs::canonicalize(input), fs::canonicalize(target)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[inline]
fn pixel_count(img: &RgbaImage) -> u64 {
    img.width() as u64 * img.height() as u64
}
