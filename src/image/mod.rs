//! Image processing.
//!
//! # Modules
//!
//! - [`background`]: Background removal (tolerance-based transparency)

pub mod background;
