//! Configuration management.
//!
//! Loads configuration from JSON files. Every section falls back to its
//! defaults, so a file only needs the values it changes.

use crate::coords::{DeviceExtent, WorldBounds};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub world: WorldBounds,
    pub canvas: CanvasConfig,
    pub window: WindowConfig,
    /// Where `S` writes the raster. The format follows the extension.
    pub snapshot_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldBounds::default(),
            canvas: CanvasConfig::default(),
            window: WindowConfig::default(),
            snapshot_path: PathBuf::from("canvas.png"),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        // Fail here rather than on the first resize.
        config.canvas.extent()?;
        Ok(config)
    }

    /// Loads `./coordcanvas.json` if it exists and is valid, otherwise the defaults.
    pub fn load_default() -> Self {
        let path = Self::default_path();
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => return config,
                Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from("coordcanvas.json")
    }
}

/// Initial raster size and colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background: [u8; 4],
    pub foreground: [u8; 4],
}

impl CanvasConfig {
    pub fn extent(&self) -> Result<DeviceExtent> {
        DeviceExtent::new(self.width, self.height)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            background: [0, 0, 0, 255],
            foreground: [255, 255, 255, 255],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "coordcanvas".to_string(),
            resizable: true,
        }
    }
}
