//! isorender - Library for decoding paletted sprite art and compositing isometric scenes
//!
//! This library provides functionality to:
//! - Decode palette-indexed sprite frames into RGBA images
//! - Cache decoded sprites by fid, with the critter catalog redirect fallback
//! - Place frames as textures addressed by opaque handles
//! - Composite visible textures in layered depth order onto a fixed canvas

pub mod color;
pub mod composition;
pub mod config;
pub mod error;
pub mod fid;
pub mod palette;
pub mod registry;
pub mod renderer;
pub mod resources;
pub mod sprite;
