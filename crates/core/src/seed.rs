//! Reproducible description of a headless particle field run.
//!
//! A [`Seed`] captures everything needed to redraw the same frame: surface
//! dimensions, params, PRNG seed, and how many frames to advance.

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// Reproducible description of a rendered frame.
///
/// Two identical `Seed` values produce bit-identical particle state and pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: u32,
    pub height: u32,
    pub params: serde_json::Value,
    pub seed: u64,
    pub frames: u64,
}

impl Seed {
    /// Creates a new Seed with default params (`{}`) and frames (`0`).
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            frames: 0,
        }
    }

    /// Validates dimensions and params.
    pub fn validate(&self) -> Result<(), FieldError> {
        self.viewport()?;
        self.config()?;
        Ok(())
    }

    pub fn viewport(&self) -> Result<Viewport, FieldError> {
        Viewport::new(self.width, self.height)
    }

    pub fn config(&self) -> Result<FieldConfig, FieldError> {
        FieldConfig::from_json(&self.params)
    }

    /// Reads a seed from a JSON file.
    pub fn load(path: &std::path::Path) -> Result<Self, FieldError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))?;
        let seed: Seed = serde_json::from_str(&text)
            .map_err(|e| FieldError::InvalidParam(format!("{}: {e}", path.display())))?;
        seed.validate()?;
        Ok(seed)
    }

    /// Writes the seed as pretty-printed JSON.
    pub fn save(&self, path: &std::path::Path) -> Result<(), FieldError> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| FieldError::InvalidParam(e.to_string()))?;
        std::fs::write(path, text).map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))
    }
}
