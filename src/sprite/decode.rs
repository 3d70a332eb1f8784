//! Indexed pixels to RGBA.

use image::RgbaImage;
use rayon::prelude::*;
use std::sync::Arc;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::fid::{Fid, ObjectType};
use crate::palette::Palette;
use crate::resources::{RawAnimation, RawSprite};

use super::{Animation, Frame, Shift, Sprite};

/// Raw sprite data that cannot form a valid decoded sprite.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Pixel buffer length disagrees with the frame dimensions
    #[error("frame is {width}x{height} but carries {actual} pixels")]
    PixelCount { width: u16, height: u16, actual: usize },
    /// An animation without frames
    #[error("animation has no frames")]
    EmptyAnimation,
    /// A sprite without animations
    #[error("sprite has no animations")]
    NoAnimations,
    /// An orientation slot points past the animation list
    #[error("orientation slot {slot} selects animation {animation}, but only {count} exist")]
    OrientationOutOfRange { slot: usize, animation: usize, count: usize },
    /// Combining the frame and animation shifts leaves the `i32` range
    #[error("shift {pixel:?} + {animation:?} overflows")]
    ShiftOverflow { pixel: Shift, animation: Shift },
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Sprite
    }
}

/// Decode one frame of palette indices into RGBA.
///
/// Each pixel takes the RGB of its palette entry; alpha is fully opaque
/// unless the entry is transparent, then fully transparent. The resulting
/// shift is `pixel_shift + animation_shift`, with `x` moved left by half the
/// width so the frame is centered on its anchor. A shift that leaves the
/// `i32` range is [`DecodeError::ShiftOverflow`].
///
/// ```
/// use isorender::color::Color;
/// use isorender::palette::Palette;
/// use isorender::sprite::{decode_frame, Shift};
///
/// let colors: Vec<Color> = (0..=255u8).map(|i| Color::new(i, i, i)).collect();
/// let palette = Palette::from_colors(colors, |i, _| i == 0).unwrap();
///
/// let frame = decode_frame(&[0, 9], 2, 1, Shift::new(3, 4), Shift::new(1, 1), &palette).unwrap();
/// assert_eq!(frame.image.as_raw(), &[0, 0, 0, 0, 9, 9, 9, 255]);
/// assert_eq!(frame.shift, Shift::new(3, 5));
/// ```
pub fn decode_frame(
    pixels: &[u8],
    width: u16,
    height: u16,
    pixel_shift: Shift,
    animation_shift: Shift,
    palette: &Palette,
) -> Result<Frame, DecodeError> {
    let stride = usize::from(width);
    if pixels.len() != stride * usize::from(height) {
        return Err(DecodeError::PixelCount { width, height, actual: pixels.len() });
    }

    let image = RgbaImage::from_fn(u32::from(width), u32::from(height), |x, y| {
        let index = pixels[y as usize * stride + x as usize];
        let entry = palette.entry(index);
        entry.color.to_rgba(entry.transparent)
    });

    let shift = pixel_shift
        .checked_add(animation_shift)
        .and_then(|s| Some(Shift::new(s.x.checked_sub(i32::from(width) / 2)?, s.y)))
        .ok_or(DecodeError::ShiftOverflow { pixel: pixel_shift, animation: animation_shift })?;

    Ok(Frame { image, shift })
}

/// Decode every frame of an animation, in order.
pub fn decode_animation(raw: &RawAnimation, palette: &Palette) -> Result<Animation, DecodeError> {
    if raw.frames.is_empty() {
        return Err(DecodeError::EmptyAnimation);
    }

    let frames = raw
        .frames
        .iter()
        .map(|f| decode_frame(&f.pixels, f.width, f.height, f.shift, raw.shift, palette).map(Arc::new))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Animation { fps: raw.fps, keyframe: raw.keyframe, frames })
}

/// Decode a whole sprite.
///
/// Animations are decoded in parallel; their order is preserved. A palette
/// carried by `raw` takes precedence over `palette`.
pub fn decode_sprite(
    raw: &RawSprite,
    palette: &Palette,
    fid: Fid,
    object_type: ObjectType,
    index: u16,
) -> Result<Sprite, DecodeError> {
    if raw.animations.is_empty() {
        return Err(DecodeError::NoAnimations);
    }

    let count = raw.animations.len();
    for (slot, &animation) in raw.orientations.iter().enumerate() {
        if animation >= count {
            return Err(DecodeError::OrientationOutOfRange { slot, animation, count });
        }
    }

    let palette = raw.palette.as_deref().unwrap_or(palette);
    let animations = raw
        .animations
        .par_iter()
        .map(|a| decode_animation(a, palette))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Sprite { fid, object_type, index, orientations: raw.orientations, animations })
}
