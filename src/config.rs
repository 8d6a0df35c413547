// Generator settings: what the editor window used to keep in its fields.
// Stored as TOML so the last-used size/color/width/radius survive restarts.

use crate::error::Error;
use crate::types::{Color, TextureSize};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "sprite-forge.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSettings {
    pub texture_size: TextureSize,
    pub color: Color,
    pub outline_width: u32,
    pub corner_radius: u32,
}

impl Default for SpriteSettings {
    fn default() -> Self {
        Self {
            texture_size: TextureSize::default(),
            color: Color::WHITE,
            outline_width: 2,
            corner_radius: 32,
        }
    }
}

impl SpriteSettings {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&data).map_err(|e| Error::Config(format!("parse {}: {e}", path.display())))
    }

    /// A missing file is not an error: defaults are used instead.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        match Self::load_from_file(path) {
            Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let text = self.to_toml()?;
        fs::write(path, text).map_err(|e| Error::io(path, e))
    }

    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(format!("serialize settings: {e}")))
    }

    /// Pull outline width and corner radius back into `0..=size/2`, the range
    /// the sliders allow. Returns true when anything changed.
    pub fn clamp_to_size(&mut self) -> bool {
        let half = self.texture_size.half();
        let mut changed = false;
        if self.outline_width > half {
            warn!("outline width {} clamped to {half}", self.outline_width);
            self.outline_width = half;
            changed = true;
        }
        if self.corner_radius > half {
            warn!("corner radius {} clamped to {half}", self.corner_radius);
            self.corner_radius = half;
            changed = true;
        }
        changed
    }
}
