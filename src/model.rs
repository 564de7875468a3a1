//! Design and material records as handed over by the storage layer.

use crate::foundation::core::Rgba8;
use crate::foundation::error::{EyeframeError, EyeframeResult};
use crate::geometry::curve::{Curve, FixedPoint, validate_shape};

/// Front of the frame, modelled as the left half only.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Front {
    /// Open contour from the hinge side to the bridge.
    pub outer_curve: Vec<FixedPoint>,
    /// Closed lens cutout.
    pub lens: Vec<FixedPoint>,
    /// Extra closed cutouts. Carried but not carved by the renderer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<Vec<FixedPoint>>,
}

/// Temple arm; both temples share one contour.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Temple {
    /// Closed temple loop.
    pub contour: Vec<FixedPoint>,
    /// Horizontal distance between the temple hinges, fixed-point units.
    #[serde(default)]
    pub temple_separation: i32,
    /// Hinge height, fixed-point units.
    #[serde(default)]
    pub temple_height: i32,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DesignRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub front: Front,
    #[serde(default)]
    pub temple: Temple,
}

impl DesignRecord {
    /// Reject designs whose curves cannot be fitted.
    ///
    /// An empty temple contour is accepted since temples are not part of the front preview.
    pub fn validate(&self) -> EyeframeResult<()> {
        if self.id.is_empty() {
            return Err(EyeframeError::validation("design id must not be empty"));
        }
        validate_shape(self.front.outer_curve.len(), false, "front.outer_curve")?;
        validate_shape(self.front.lens.len(), true, "front.lens")?;
        for (i, hole) in self.front.holes.iter().enumerate() {
            validate_shape(hole.len(), true, &format!("front.holes[{i}]"))?;
        }
        if !self.temple.contour.is_empty() {
            validate_shape(self.temple.contour.len(), true, "temple.contour")?;
        }
        Ok(())
    }

    pub fn outer_curve_mm(&self, units_per_mm: u32) -> Curve {
        Curve::from_fixed(&self.front.outer_curve, units_per_mm)
    }

    pub fn lens_mm(&self, units_per_mm: u32) -> Curve {
        Curve::from_fixed(&self.front.lens, units_per_mm)
    }

    pub fn temple_contour_mm(&self, units_per_mm: u32) -> Curve {
        Curve::from_fixed(&self.temple.contour, units_per_mm)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaterialRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub top_color: Rgba8,
    /// Texture locator resolved by a [`crate::TextureLoader`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_texture: Option<String>,
}

/// What the rasterizer needs from a material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialAppearance {
    pub fill: Rgba8,
    pub texture: Option<String>,
}

impl MaterialRecord {
    pub fn validate(&self) -> EyeframeResult<()> {
        if self.id.is_empty() {
            return Err(EyeframeError::validation("material id must not be empty"));
        }
        Ok(())
    }

    pub fn appearance(&self) -> MaterialAppearance {
        MaterialAppearance {
            fill: self.top_color,
            texture: self.top_texture.clone().filter(|t| !t.trim().is_empty()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
