//! Palette color values
//!
//! Palette entries carry no alpha of their own. Whether a pixel is drawn at all
//! is decided by the palette's transparency flag, so conversion to RGBA takes
//! the alpha from the caller and never blends.

use image::Rgba;
use thiserror::Error;

/// Alpha written for pixels that are drawn
pub const OPAQUE: u8 = u8::MAX;

/// Alpha written for "no pixel"
pub const TRANSPARENT: u8 = u8::MIN;

/// Error type for hex color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 6 hex chars after #)
    #[error("invalid color length {0}, expected 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// An RGB triple as stored in a palette table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Expand to RGBA with binary alpha.
    pub fn to_rgba(self, transparent: bool) -> Rgba<u8> {
        let alpha = if transparent { TRANSPARENT } else { OPAQUE };
        Rgba([self.r, self.g, self.b, alpha])
    }

    /// Parse a `#RRGGBB` string.
    ///
    /// ```
    /// use isorender::color::Color;
    ///
    /// assert_eq!(Color::from_hex("#FF8000").unwrap(), Color::new(255, 128, 0));
    /// assert!(Color::from_hex("FF8000").is_err());
    /// ```
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

        if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(c));
        }
        if hex.len() != 6 {
            return Err(ColorError::InvalidLength(hex.len()));
        }

        let pair = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16);
        match (pair(0), pair(2), pair(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
            // unreachable after the digit check, kept total
            _ => Err(ColorError::InvalidLength(hex.len())),
        }
    }
}
