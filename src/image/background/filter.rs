use image::RgbaImage;

use crate::image::background::color::BackgroundColor;

/// Default color distance below which a pixel counts as background.
pub const DEFAULT_TOLERANCE: f64 = 30.0;

/// Inputs of one transform call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterOptions {
    pub background: BackgroundColor,
    /// Non-negative; a pixel is cleared when its distance is strictly below it.
    pub tolerance: f64,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            background: BackgroundColor::WHITE,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Clear alpha on every pixel close to the background color.
///
/// Each pixel is classified on its own: RGB is never touched, matching pixels
/// get alpha 0 whatever their previous alpha, everything else keeps its alpha.
/// Returns the number of pixels that matched.
pub fn apply_transparency(img: &mut RgbaImage, options: &FilterOptions) -> usize {
    let mut cleared = 0;
    for pixel in img.pixels_mut() {
        if options.background.distance(pixel) < options.tolerance {
            pixel[3] = 0;
            cleared += 1;
        }
    }
    cleared
}
