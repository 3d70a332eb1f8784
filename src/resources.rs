//! Interface to the asset-format layer.
//!
//! Catalog lookups, file parsing and split-sprite merging happen outside this
//! crate. [`ResourceFetcher`] is the seam: it hands back raw, still-indexed
//! sprite data which the decoder turns into RGBA frames.

use std::sync::Arc;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::fid::{Fid, ObjectType, Orientation};
use crate::palette::{Palette, PaletteError};
use crate::sprite::Shift;

/// Failure reported by the asset-format layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ResourceError {
    /// A palette source was missing or malformed
    #[error("palette error: {0}")]
    Palette(#[from] PaletteError),
    /// A catalog (LST) lookup failed
    #[error("catalog lookup failed: {0}")]
    Index(String),
    /// A prototype could not be parsed
    #[error("prototype error: {0}")]
    Prototype(String),
    /// A raw sprite could not be parsed
    #[error("sprite error: {0}")]
    Sprite(String),
    /// Orientation parts of a split sprite could not be merged
    #[error("sprite merge failed: {0}")]
    Merge(String),
}

impl ResourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResourceError::Palette(_) => ErrorKind::Palette,
            ResourceError::Index(_) => ErrorKind::Index,
            ResourceError::Prototype(_) => ErrorKind::Prototype,
            ResourceError::Sprite(_) => ErrorKind::Sprite,
            ResourceError::Merge(_) => ErrorKind::Merge,
        }
    }
}

/// One undecoded frame: palette indices in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawFrame {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<u8>,
    /// Per-frame draw offset
    pub shift: Shift,
}

/// One undecoded animation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawAnimation {
    pub fps: u16,
    pub keyframe: u16,
    /// Offset shared by every frame of the animation
    pub shift: Shift,
    pub frames: Vec<RawFrame>,
}

/// An undecoded sprite as produced by the format parser.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSprite {
    /// Animation index used for each orientation slot
    pub orientations: [usize; Orientation::COUNT],
    pub animations: Vec<RawAnimation>,
    /// Palette shipped alongside the art, overriding the default one
    pub palette: Option<Arc<Palette>>,
}

/// The part of a parsed prototype the renderer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPrototype {
    pub pid: u32,
    pub object_type: ObjectType,
    /// Art used to draw objects built from this prototype
    pub fid: Fid,
}

/// A catalog (LST) line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Base file name of the art asset
    pub name: String,
    /// Catalog index whose art this entry falls back to
    pub redirect: u16,
}

/// Source of raw sprite data.
pub trait ResourceFetcher {
    /// Raw sprite at `index` of the `object_type` catalog.
    fn raw_sprite(&self, object_type: ObjectType, index: u16) -> Result<RawSprite, ResourceError>;

    /// Single-file critter sprite for `fid`, using the art of catalog entry `index`.
    ///
    /// `fid` carries the bits that select the animation suffix; `index` may differ
    /// from the one encoded in `fid` when following a catalog redirect.
    fn raw_sprite_for_fid(&self, fid: Fid, index: u16) -> Result<RawSprite, ResourceError>;

    /// One orientation file of a split critter sprite.
    fn raw_sprite_part(
        &self,
        fid: Fid,
        index: u16,
        orientation: Orientation,
    ) -> Result<RawSprite, ResourceError>;

    /// Merge the orientation parts of a split sprite, in slot order, into one sprite.
    fn merge(&self, parts: Vec<RawSprite>) -> Result<RawSprite, ResourceError>;

    /// Catalog line at `index` of the `object_type` catalog.
    fn catalog_entry(
        &self,
        object_type: ObjectType,
        index: u16,
    ) -> Result<CatalogEntry, ResourceError>;

    /// Prototype `pid` of the given object type.
    fn raw_prototype(
        &self,
        pid: u32,
        object_type: ObjectType,
    ) -> Result<RawPrototype, ResourceError>;
}

impl<T: ResourceFetcher + ?Sized> ResourceFetcher for Box<T> {
    fn raw_sprite(&self, object_type: ObjectType, index: u16) -> Result<RawSprite, ResourceError> {
        (**self).raw_sprite(object_type, index)
    }

    fn raw_sprite_for_fid(&self, fid: Fid, index: u16) -> Result<RawSprite, ResourceError> {
        (**self).raw_sprite_for_fid(fid, index)
    }

    fn raw_sprite_part(
        &self,
        fid: Fid,
        index: u16,
        orientation: Orientation,
    ) -> Result<RawSprite, ResourceError> {
        (**self).raw_sprite_part(fid, index, orientation)
    }

    fn merge(&self, parts: Vec<RawSprite>) -> Result<RawSprite, ResourceError> {
        (**self).merge(parts)
    }

    fn catalog_entry(
        &self,
        object_type: ObjectType,
        index: u16,
    ) -> Result<CatalogEntry, ResourceError> {
        (**self).catalog_entry(object_type, index)
    }

    fn raw_prototype(
        &self,
        pid: u32,
        object_type: ObjectType,
    ) -> Result<RawPrototype, ResourceError> {
        (**self).raw_prototype(pid, object_type)
    }
}
