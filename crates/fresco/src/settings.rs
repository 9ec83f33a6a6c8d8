//! Render settings, loadable from TOML.

use std::path::Path;

use fresco_scene::{RenderOptions, Viewport};
use serde::{Deserialize, Serialize};

use crate::error::{FrescoError, Result};

/// Output size, sampling and styling for one render.
///
/// Every field has a default, so a settings file only needs the keys it
/// changes:
///
/// ```toml
/// width = 1200
/// subdivision_step = 0.02
/// seed = 7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels.
    pub width: f64,
    /// Output height in pixels.
    pub height: f64,
    /// Maximum world-space spacing between visibility samples.
    pub subdivision_step: f64,
    /// Clip-space simplification tolerance; none keeps every sample.
    pub simplify_tolerance: Option<f64>,
    /// Seed for sketches that place geometry randomly.
    pub seed: u64,
    /// Base stroke width in pixels, multiplied by each path's own weight.
    pub stroke_width: f64,
    /// SVG background fill; empty for transparent.
    pub background: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 1024.0,
            subdivision_step: 0.01,
            simplify_tolerance: None,
            seed: 0,
            stroke_width: 1.0,
            background: "#ffffff".into(),
        }
    }
}

impl RenderSettings {
    /// Parse settings from TOML and validate them.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| FrescoError::InvalidSettings(format!("cannot serialize: {e}")))
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(FrescoError::InvalidSettings(
                "width must be positive".into(),
            ));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(FrescoError::InvalidSettings(
                "height must be positive".into(),
            ));
        }
        if !(self.subdivision_step.is_finite() && self.subdivision_step >= 0.0) {
            return Err(FrescoError::InvalidSettings(
                "subdivision_step must be zero or positive".into(),
            ));
        }
        if let Some(tolerance) = self.simplify_tolerance {
            if !(tolerance.is_finite() && tolerance >= 0.0) {
                return Err(FrescoError::InvalidSettings(
                    "simplify_tolerance must be zero or positive".into(),
                ));
            }
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            return Err(FrescoError::InvalidSettings(
                "stroke_width must be positive".into(),
            ));
        }
        Ok(())
    }

    /// The output viewport.
    pub fn viewport(&self) -> Result<Viewport> {
        Ok(Viewport::new(self.width, self.height)?)
    }

    /// Render options derived from these settings.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            subdivision_step: self.subdivision_step,
            simplify_tolerance: self.simplify_tolerance,
        }
    }
}
