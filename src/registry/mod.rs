//! Keyed stores owned by the renderer.
//!
//! This module provides:
//! - A unified `Registry` trait for consistent keyed-store interfaces
//! - `SpriteCache` for decoded sprites, keyed by fid and filled on demand
//! - `TextureRegistry` for placed frame instances, keyed by opaque handle
//!
//! Neither store is synchronized; both are meant to be owned by one worker.

mod sprite;
mod texture;
mod traits;

pub use sprite::{CacheError, SpriteCache};
pub use texture::{
    GridIndexes, Point, RegistryError, Texture, TextureHandle, TextureRegistry, Visibility,
};
pub use traits::Registry;
