use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::Deserialize;
use thiserror::Error;

/// Reference color whose neighbourhood becomes transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ColorSpec")]
pub struct BackgroundColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("invalid hex color `{0}` (expected #rrggbb or #rgb)")]
    Hex(String),

    #[error("invalid rgb triple `{0}` (expected r,g,b with values 0-255)")]
    Triple(String),
}

impl BackgroundColor {
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Euclidean RGB distance to a pixel. Alpha is ignored.
    #[inline]
    pub fn distance(&self, pixel: &Rgba<u8>) -> f64 {
        let dr = self.r as f64 - pixel[0] as f64;
        let dg = self.g as f64 - pixel[1] as f64;
        let db = self.b as f64 - pixel[2] as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let hex = input.trim_start_matches('#');
        let err = || ColorParseError::Hex(input.to_string());
        if !hex.is_ascii() {
            return Err(err());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // #abc -> #aabbcc
            3 => {
                let short = |s: &str| channel(s).map(|v| v * 17);
                Ok(Self::new(
                    short(&hex[0..1])?,
                    short(&hex[1..2])?,
                    short(&hex[2..3])?,
                ))
            }
            _ => Err(err()),
        }
    }

    fn from_triple(input: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError::Triple(input.to_string());
        let channels = input
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| err()))
            .collect::<Result<Vec<_>, _>>()?;

        match channels.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => Err(err()),
        }
    }
}

impl Default for BackgroundColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for BackgroundColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(',') {
            Self::from_triple(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Accepted config forms: `"#ffffff"`, `"255,255,255"` or `[255, 255, 255]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorSpec {
    Text(String),
    Channels([u8; 3]),
}

impl TryFrom<ColorSpec> for BackgroundColor {
    type Error = ColorParseError;

    fn try_from(spec: ColorSpec) -> Result<Self, Self::Error> {
        match spec {
            ColorSpec::Text(s) => s.parse(),
            ColorSpec::Channels([r, g, b]) => Ok(Self::new(r, g, b)),
        }
    }
}
