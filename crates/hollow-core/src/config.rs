//! Hollowing configuration.
//!
//! The print pipeline drives hollowing from a small JSON config. Every field
//! is optional; missing fields fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{HollowError, HollowResult};

/// Configuration for the hollowing pipeline.
///
/// ```json
/// {
///   "min_thickness": 2.0,
///   "quality": 0.5,
///   "closing_distance": 0.5,
///   "enabled": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HollowConfig {
    /// Minimum wall thickness in mm. Must be positive.
    #[serde(default = "default_min_thickness")]
    pub min_thickness: f64,
    /// Quality knob in `[0, 1]`. Higher values oversample the voxel grid
    /// more, giving a smoother cavity at a higher memory cost. Out-of-range
    /// values are clamped during validation.
    #[serde(default = "default_quality")]
    pub quality: f64,
    /// Morphological closing distance in mm. Cavity features narrower than
    /// this are sealed off so they stay printable. `0` disables closing.
    #[serde(default = "default_closing_distance")]
    pub closing_distance: f64,
    /// When false the pipeline passes the input through unchanged.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_min_thickness() -> f64 {
    2.0
}

fn default_quality() -> f64 {
    0.5
}

fn default_closing_distance() -> f64 {
    0.5
}

fn default_enabled() -> bool {
    true
}

impl Default for HollowConfig {
    fn default() -> Self {
        Self {
            min_thickness: default_min_thickness(),
            quality: default_quality(),
            closing_distance: default_closing_distance(),
            enabled: default_enabled(),
        }
    }
}

impl HollowConfig {
    /// Set the wall thickness in mm.
    pub fn with_min_thickness(mut self, thickness: f64) -> Self {
        self.min_thickness = thickness;
        self
    }

    /// Set the quality knob.
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    /// Set the closing distance in mm.
    pub fn with_closing_distance(mut self, distance: f64) -> Self {
        self.closing_distance = distance;
        self
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigRead` if the file can't be read, `ConfigParse` if the
    /// JSON is invalid, and the respective validation error for out-of-range
    /// fields.
    pub fn load(path: impl AsRef<Path>) -> HollowResult<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| HollowError::config_read(path, e))?;
        let mut config: Self = serde_json::from_str(&contents)
            .map_err(|e| HollowError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field ranges, clamping `quality` into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidThickness` for a non-positive `min_thickness` and
    /// `InvalidClosingDistance` for a negative `closing_distance`.
    pub fn validate(&mut self) -> HollowResult<()> {
        if !(self.min_thickness > 0.0) {
            return Err(HollowError::invalid_thickness(self.min_thickness));
        }
        if !(self.closing_distance >= 0.0) {
            return Err(HollowError::invalid_closing_distance(self.closing_distance));
        }
        if !(0.0..=1.0).contains(&self.quality) {
            let clamped = self.quality.clamp(0.0, 1.0);
            warn!(
                quality = self.quality,
                clamped, "quality out of [0, 1], clamping"
            );
            self.quality = clamped;
        }
        Ok(())
    }
}
