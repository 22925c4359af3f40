//! Make a solid background color transparent.
//!
//! Every pixel whose Euclidean RGB distance to the background color is
//! strictly below the tolerance gets alpha 0; all other pixels are left
//! exactly as decoded. There is no spatial awareness: enclosed regions of
//! background color are cleared too, and anti-aliased edges keep a hard cut.

mod color;
mod error;
mod filter;
mod output;
mod process;

pub use color::BackgroundColor;
pub use filter::{DEFAULT_TOLERANCE, FilterOptions};
pub use output::DEFAULT_SUFFIX;
pub use process::make_transparent;
