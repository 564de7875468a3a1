//! Render and publishing configuration.
//!
//! Every field has a default so a partial JSON document is a valid config. Environment
//! overrides are applied on top by the caller via [`RenderConfig::with_env_overrides`] and
//! [`StoreConfig::from_env`].

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{EyeframeError, EyeframeResult};

/// Overrides [`RenderConfig::pixels_per_mm`].
pub const ENV_PIXELS_PER_MM: &str = "EYEFRAME_PIXELS_PER_MM";
/// Overrides [`StoreConfig::static_dir`].
pub const ENV_STATIC_FILES: &str = "EYEFRAME_STATIC_FILES";

/// How the compositor finds the fill and lens regions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum KeyingMode {
    /// Explicit per-pixel region mask built from separately rasterized coverage.
    #[default]
    RegionMask,
    /// Exact color equality: fill color for the texture, `lens_sentinel` for transparency.
    ColorKey { lens_sentinel: Rgba8 },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub canvas: Canvas,
    /// Output pixel density.
    pub pixels_per_mm: f64,
    /// Fixed-point units per millimeter in stored design records.
    pub units_per_mm: u32,
    /// Outline stroke width in pixels; `0` disables the stroke.
    pub stroke_width_px: f64,
    /// Subtracted from texture alpha when it replaces the flat fill.
    pub texture_alpha_offset: u8,
    /// Canvas color outside the frame.
    pub background: Rgba8,
    pub keying: KeyingMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            pixels_per_mm: 10.0,
            units_per_mm: 100,
            stroke_width_px: 1.0,
            texture_alpha_offset: 20,
            background: Rgba8::TRANSPARENT,
            keying: KeyingMode::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_json_path(path: &Path) -> EyeframeResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read render config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse render config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply [`ENV_PIXELS_PER_MM`] when set to a number.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = std::env::var(ENV_PIXELS_PER_MM)
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
        {
            self.pixels_per_mm = v;
        }
        self
    }

    pub fn validate(&self) -> EyeframeResult<()> {
        self.canvas.validate()?;
        if !(self.pixels_per_mm.is_finite() && self.pixels_per_mm > 0.0) {
            return Err(EyeframeError::validation(
                "pixels_per_mm must be finite and > 0",
            ));
        }
        if self.units_per_mm == 0 {
            return Err(EyeframeError::validation("units_per_mm must be > 0"));
        }
        if !(self.stroke_width_px.is_finite() && self.stroke_width_px >= 0.0) {
            return Err(EyeframeError::validation(
                "stroke_width_px must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Canvas column of the symmetry axis.
    pub fn origin_x(&self) -> f64 {
        f64::from(self.canvas.width) / 2.0
    }
}

/// Where published previews go and how clients address them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub static_dir: PathBuf,
    /// Prefix joined with the file name to form the preview URL.
    pub base_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("./static-files/"),
            base_url: "/static".to_string(),
        }
    }
}

impl StoreConfig {
    /// Defaults with [`ENV_STATIC_FILES`] applied when set and non-empty.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(dir) = std::env::var_os(ENV_STATIC_FILES).filter(|v| !v.is_empty()) {
            cfg.static_dir = PathBuf::from(dir);
        }
        cfg
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
