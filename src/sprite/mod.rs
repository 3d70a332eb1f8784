//! Decoded sprite art: frames, animations and sprites.

mod decode;

pub use decode::{decode_animation, decode_frame, decode_sprite, DecodeError};

use image::RgbaImage;
use std::sync::Arc;

use crate::fid::{Fid, ObjectType, Orientation};

/// A pixel offset applied when a frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Shift {
    pub x: i32,
    pub y: i32,
}

impl Shift {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum, `None` on overflow.
    pub fn checked_add(self, rhs: Shift) -> Option<Shift> {
        Some(Shift::new(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }
}

/// A decoded, ready-to-draw bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// RGBA pixels, `width * height * 4` bytes
    pub image: RgbaImage,
    /// Draw offset; `x` already includes the half-width centering correction
    pub shift: Shift,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// A decoded animation. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub fps: u16,
    /// Frame shown when the object is static
    pub keyframe: u16,
    pub frames: Vec<Arc<Frame>>,
}

impl Animation {
    pub fn frame(&self, index: usize) -> Option<&Arc<Frame>> {
        self.frames.get(index)
    }

    /// The keyframe, or the first frame when the keyframe index is out of range.
    ///
    /// `None` only for an animation without frames, which the decoder never builds.
    pub fn key_frame(&self) -> Option<&Arc<Frame>> {
        self.frames.get(usize::from(self.keyframe)).or_else(|| self.frames.first())
    }
}

/// A decoded sprite with one animation per orientation slot.
///
/// Every orientation slot indexes into `animations`, and `animations` is
/// never empty. [`decode_sprite`] checks both before a `Sprite` is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub fid: Fid,
    pub object_type: ObjectType,
    /// Index within the object type's catalog
    pub index: u16,
    pub orientations: [usize; Orientation::COUNT],
    pub animations: Vec<Animation>,
}

impl Sprite {
    /// Animation shown for `orientation`, `None` if its slot points past `animations`.
    pub fn animation(&self, orientation: Orientation) -> Option<&Animation> {
        self.animations.get(self.orientations[orientation.index()])
    }
}
