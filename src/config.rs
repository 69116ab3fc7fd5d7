// Workspace configuration: dragging mode and box coloring options.

use serde::Deserialize;
use std::path::Path;

use crate::style::{ColorMethod, Rgb};

/// How relocated items are positioned by the renderer after a drop.
/// A styling hint passed through to the presentation layer, never a
/// structural rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraggingMode {
    /// Items retain free positioning.
    Free,
    /// Items snap into their container's flow.
    Contained,
}

impl DraggingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DraggingMode::Free => "free",
            DraggingMode::Contained => "contained",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free" => Some(DraggingMode::Free),
            "contained" => Some(DraggingMode::Contained),
            _ => None,
        }
    }
}

/// Top-level workspace configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub dragging: DraggingConfig,
    pub boxes: BoxesConfig,
}

/// Dragging behavior configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraggingConfig {
    pub mode: DraggingMode,
}

/// Box coloring configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxesConfig {
    pub primary_color: Rgb,
    pub secondary_color: Rgb,
    pub color_method: ColorMethod,
}

/// Errors that can occur during config loading and validation.
///
/// These are the only fatal errors in the crate: a workspace cannot be
/// constructed from an invalid configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

// ── Serde intermediate structs ───────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    dragging: RawDraggingConfig,
    boxes: RawBoxesConfig,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawDraggingConfig {
    mode: String,
}

impl Default for RawDraggingConfig {
    fn default() -> Self {
        Self {
            mode: "contained".to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawBoxesConfig {
    primary_color: String,
    secondary_color: String,
    color_method: String,
}

impl Default for RawBoxesConfig {
    fn default() -> Self {
        Self {
            primary_color: "rgb(25, 123, 210)".to_string(),
            secondary_color: "rgb(0, 240, 192)".to_string(),
            color_method: "shade".to_string(),
        }
    }
}

// ── Default impls ────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            dragging: DraggingConfig {
                mode: DraggingMode::Contained,
            },
            boxes: BoxesConfig {
                primary_color: Rgb::new(25, 123, 210),
                secondary_color: Rgb::new(0, 240, 192),
                color_method: ColorMethod::Shade,
            },
        }
    }
}

// ── Config implementation ────────────────────────────────────────────────

impl Config {
    /// Load config from a TOML file path. Returns defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse a TOML string into a Config.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mode = DraggingMode::from_str(&raw.dragging.mode).ok_or_else(|| {
            ConfigError::Validation(format!(
                "unknown dragging mode '{}', valid modes: free, contained",
                raw.dragging.mode
            ))
        })?;

        let color_method = ColorMethod::from_str(&raw.boxes.color_method).ok_or_else(|| {
            ConfigError::Validation(format!(
                "unknown color method '{}', valid methods: shade, alternate",
                raw.boxes.color_method
            ))
        })?;

        Ok(Self {
            dragging: DraggingConfig { mode },
            boxes: BoxesConfig {
                primary_color: parse_color("boxes.primary_color", &raw.boxes.primary_color)?,
                secondary_color: parse_color("boxes.secondary_color", &raw.boxes.secondary_color)?,
                color_method,
            },
        })
    }

    /// Default configuration as TOML text, for `--print-default-config`.
    pub fn print_default() -> String {
        let d = Self::default();
        format!(
            "[dragging]\n\
             mode = \"{}\"\n\
             \n\
             [boxes]\n\
             primary_color = \"{}\"\n\
             secondary_color = \"{}\"\n\
             color_method = \"{}\"\n",
            d.dragging.mode.as_str(),
            d.boxes.primary_color,
            d.boxes.secondary_color,
            d.boxes.color_method.as_str(),
        )
    }
}

fn parse_color(key: &str, value: &str) -> Result<Rgb, ConfigError> {
    Rgb::parse(value).ok_or_else(|| {
        ConfigError::Validation(format!(
            "{key}: '{value}' is not an rgb(r, g, b) color"
        ))
    })
}
