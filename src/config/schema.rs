//! Configuration schema types for `isorender.toml`
//!
//! Defines the structure and validation rules for renderer configuration.

use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorError};
use crate::composition::{LayerMask, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::palette::TransparentRule;

/// Canvas dimensions section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: default_width(), height: default_height() }
    }
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

/// Palette transparency section
///
/// At most one of the two keys may be set. With neither, every entry is drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Palette index that stands for "no pixel"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent_index: Option<u8>,
    /// `#RRGGBB` color that stands for "no pixel"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent_color: Option<String>,
}

impl PaletteConfig {
    /// Transparency rule for palette tables loaded with this configuration.
    ///
    /// When both keys are set the index wins; [`RenderConfig::validate`]
    /// reports that case.
    pub fn transparent_rule(&self) -> Result<TransparentRule, ColorError> {
        match (self.transparent_index, &self.transparent_color) {
            (Some(index), _) => Ok(TransparentRule::Index(index)),
            (None, Some(hex)) => Ok(TransparentRule::Color(Color::from_hex(hex)?)),
            (None, None) => Ok(TransparentRule::None),
        }
    }
}

/// Root configuration structure for `isorender.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Canvas dimensions
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// Layer categories drawn at render time
    #[serde(default)]
    pub layers: LayerMask,
    /// How palette tables mark transparent entries
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "canvas.width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "isorender.toml: '{}' {}", self.field, self.message)
    }
}

impl RenderConfig {
    /// Parse a configuration from TOML source without validating it.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.canvas.width == 0 {
            errors.push(ConfigValidationError {
                field: "canvas.width".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.canvas.height == 0 {
            errors.push(ConfigValidationError {
                field: "canvas.height".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.palette.transparent_index.is_some() && self.palette.transparent_color.is_some() {
            errors.push(ConfigValidationError {
                field: "palette".to_string(),
                message: "set only one of transparent_index and transparent_color".to_string(),
            });
        }

        if let Some(hex) = &self.palette.transparent_color {
            if let Err(e) = Color::from_hex(hex) {
                errors.push(ConfigValidationError {
                    field: "palette.transparent_color".to_string(),
                    message: e.to_string(),
                });
            }
        }

        errors
    }
}
