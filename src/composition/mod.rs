//! Composition - layering placed textures onto a canvas

mod canvas;
mod layer;
mod render;

// Re-export public API
pub use canvas::{Canvas, CanvasSnapshot, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use layer::{LayerMask, Order};
pub use render::{compare_depth, composite, paint_order};
