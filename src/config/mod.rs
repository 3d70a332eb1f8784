//! Configuration module for the renderer
//!
//! Provides types, parsing and discovery for `isorender.toml`.

pub mod loader;
pub mod schema;

pub use loader::{default_config, find_config_from, load_config, ConfigError, CONFIG_FILE_NAME};
pub use schema::*;
