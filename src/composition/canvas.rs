//! The output raster and its frozen snapshots.

use image::{Rgba, RgbaImage};
use std::sync::Arc;

use crate::registry::Point;
use crate::sprite::Frame;

/// Canvas width of the reference configuration
pub const DEFAULT_WIDTH: u32 = 8000;

/// Canvas height of the reference configuration
pub const DEFAULT_HEIGHT: u32 = 3600;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Fixed-size RGBA raster that textures are painted into.
///
/// Placement uses a bottom-up vertical axis: a frame whose anchor lands at
/// world `y` is drawn with its lower edge on canvas `height - y` counted from
/// the bottom, which is raster row `y` counted from the top.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, CLEAR) }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Reset every pixel to fully transparent.
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = CLEAR;
        }
    }

    /// Lower-left corner of `frame` placed at `origin`, in bottom-up canvas space.
    pub fn anchor(&self, frame: &Frame, origin: Point) -> (i64, i64) {
        let x = i64::from(origin.x) + i64::from(frame.shift.x);
        let y = i64::from(self.height()) - (i64::from(origin.y) + i64::from(frame.shift.y));
        (x, y)
    }

    /// Paint `frame` placed at `origin`.
    ///
    /// Transparent source pixels leave the canvas untouched, opaque ones
    /// replace it. Parts falling outside the canvas are clipped.
    pub fn paint(&mut self, frame: &Frame, origin: Point) {
        let (left, bottom) = self.anchor(frame, origin);
        let top = i64::from(self.height()) - bottom - i64::from(frame.height());
        blit_opaque(&mut self.image, &frame.image, left, top);
    }

    /// Freeze the current contents.
    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot(Arc::new(self.image.clone()))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Immutable copy of a rendered canvas, cheap to clone and share across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSnapshot(Arc<RgbaImage>);

impl CanvasSnapshot {
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Pixel at raster position (`x`, `y`), top-left origin.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.0.get_pixel(x, y))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.0
    }
}

/// Copy every opaque pixel of `sprite` onto `canvas` with its top-left at (`x`, `y`).
fn blit_opaque(canvas: &mut RgbaImage, sprite: &RgbaImage, x: i64, y: i64) {
    let canvas_width = i64::from(canvas.width());
    let canvas_height = i64::from(canvas.height());

    for (sy, row) in sprite.rows().enumerate() {
        let dest_y = y + sy as i64;
        if dest_y < 0 {
            continue;
        }
        if dest_y >= canvas_height {
            break;
        }

        for (sx, pixel) in row.enumerate() {
            let dest_x = x + sx as i64;
            if dest_x < 0 {
                continue;
            }
            if dest_x >= canvas_width {
                break;
            }

            // Binary alpha: nothing to blend
            if pixel[3] == 0 {
                continue;
            }
            canvas.put_pixel(dest_x as u32, dest_y as u32, *pixel);
        }
    }
}
