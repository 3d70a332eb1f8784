//! 256-entry color palettes for indexed sprite art.
//!
//! The byte layout of a palette file and the rule for which entry means
//! "no pixel" both belong to the asset format. A [`PaletteFormat`] supplies
//! them; [`Palette`] owns the resulting table and evaluates the rule once per
//! entry at load time.

use thiserror::Error;

use crate::color::Color;

/// Number of entries in every palette
pub const PALETTE_SIZE: usize = 256;

/// Error when loading a palette.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PaletteError {
    /// The source produced a table of the wrong size
    #[error("palette has {0} entries, expected 256")]
    EntryCount(usize),
    /// The source ended before the table was complete
    #[error("palette source truncated: {actual} bytes, expected {expected}")]
    Truncated { actual: usize, expected: usize },
    /// The source could not be interpreted
    #[error("malformed palette source: {0}")]
    Malformed(String),
}

/// A palette file format: how to read the color table and which colors are
/// transparent.
pub trait PaletteFormat {
    /// Parse the raw palette source into its color table.
    fn parse(&self, bytes: &[u8]) -> Result<Vec<Color>, PaletteError>;

    /// Whether the entry at `index` with value `color` is the "no pixel" sentinel.
    fn is_transparent(&self, index: u8, color: Color) -> bool;
}

/// One palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: Color,
    pub transparent: bool,
}

/// An immutable table of exactly 256 colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Box<[PaletteEntry; PALETTE_SIZE]>,
}

impl Palette {
    /// Load a palette from raw bytes using the given format.
    pub fn load<F: PaletteFormat + ?Sized>(bytes: &[u8], format: &F) -> Result<Self, PaletteError> {
        let colors = format.parse(bytes)?;
        Self::from_colors(colors, |index, color| format.is_transparent(index, color))
    }

    /// Build a palette from an already parsed color table.
    ///
    /// `transparent` is evaluated once per entry.
    pub fn from_colors<P>(colors: Vec<Color>, transparent: P) -> Result<Self, PaletteError>
    where
        P: Fn(u8, Color) -> bool,
    {
        if colors.len() != PALETTE_SIZE {
            return Err(PaletteError::EntryCount(colors.len()));
        }

        let mut entries = Box::new(
            [PaletteEntry { color: Color::BLACK, transparent: false }; PALETTE_SIZE],
        );
        for (index, (entry, color)) in entries.iter_mut().zip(colors).enumerate() {
            // PALETTE_SIZE entries, so index always fits
            let index = index as u8;
            *entry = PaletteEntry { color, transparent: transparent(index, color) };
        }

        Ok(Self { entries })
    }

    pub fn color_at(&self, index: u8) -> Color {
        self.entries[usize::from(index)].color
    }

    pub fn is_transparent(&self, index: u8) -> bool {
        self.entries[usize::from(index)].transparent
    }

    pub fn entry(&self, index: u8) -> PaletteEntry {
        self.entries[usize::from(index)]
    }

    /// Iterate over all 256 entries in index order.
    pub fn entries(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }
}

/// Which palette entry stands for "no pixel" in an [`Rgb888Format`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransparentRule {
    /// Every entry is drawn
    #[default]
    None,
    /// The entry at this index is transparent
    Index(u8),
    /// Every entry with exactly this color is transparent
    Color(Color),
}

/// A bare table of 256 packed 8-bit RGB triples (768 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb888Format {
    pub transparent: TransparentRule,
}

impl Rgb888Format {
    /// Byte length of a complete table
    pub const LEN: usize = PALETTE_SIZE * 3;

    pub fn new(transparent: TransparentRule) -> Self {
        Self { transparent }
    }
}

impl PaletteFormat for Rgb888Format {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<Color>, PaletteError> {
        if bytes.len() < Self::LEN {
            return Err(PaletteError::Truncated { actual: bytes.len(), expected: Self::LEN });
        }
        if bytes.len() > Self::LEN {
            return Err(PaletteError::Malformed(format!(
                "{} trailing bytes after color table",
                bytes.len() - Self::LEN
            )));
        }

        Ok(bytes.chunks_exact(3).map(|rgb| Color::new(rgb[0], rgb[1], rgb[2])).collect())
    }

    fn is_transparent(&self, index: u8, color: Color) -> bool {
        match self.transparent {
            TransparentRule::None => false,
            TransparentRule::Index(sentinel) => index == sentinel,
            TransparentRule::Color(sentinel) => color == sentinel,
        }
    }
}
