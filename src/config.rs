use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

pub const TILE_SIZE_DEFAULT: u32 = 32;
const WINDOW_WIDTH_DEFAULT: u32 = 320;
const WINDOW_HEIGHT_DEFAULT: u32 = 240;
const PIXEL_SCALE_DEFAULT: u32 = 2;

/// Editor settings, read from an optional TOML file.
///
/// ```toml
/// tile_size = 32
///
/// [window]
/// width = 320
/// height = 240
/// pixel_scale = 2
///
/// [log]
/// level = "debug"
/// file = "wizard.log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tile_size: u32,
    pub window: WindowConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub pixel_scale: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            tile_size: TILE_SIZE_DEFAULT,
            window: WindowConfig::default(),
            log: LogConfig::default(),
        };
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        return Self {
            width: WINDOW_WIDTH_DEFAULT,
            height: WINDOW_HEIGHT_DEFAULT,
            pixel_scale: PIXEL_SCALE_DEFAULT,
        };
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        return Self {
            level: "info".into(),
            file: Some(PathBuf::from("wizard.log")),
        };
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        return Self::from_toml(&text);
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        return Ok(toml::from_str(text)?);
    }
}
