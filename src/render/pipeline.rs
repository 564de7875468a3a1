use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::{
    assets::texture::TextureLoader,
    config::RenderConfig,
    encode::{png::encode_png, store::RenderStore},
    foundation::core::{BezPath, CubicBez},
    foundation::error::{EyeframeError, EyeframeResult},
    geometry::fit::{FitOptions, fit_beziers},
    model::{DesignRecord, MaterialRecord},
    render::frame::{FilledFrame, FrameStyle},
    render::path::{closed_runs_path, outline_path},
    transform::curve::{MirroredPair, Placement, scale},
};

/// Shared cancellation flag with an optional deadline.
///
/// Clones share the flag. The token is checked between render stages, so a stage that is
/// already running completes before the render stops.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed) || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// `Err(Cancelled)` once the token was cancelled or its deadline passed.
    pub fn check(&self, stage: &str) -> EyeframeResult<()> {
        if self.flag.load(Ordering::Relaxed) {
            return Err(EyeframeError::cancelled(format!("cancelled before {stage}")));
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(EyeframeError::cancelled(format!(
                "deadline passed before {stage}"
            )));
        }
        Ok(())
    }
}

/// Encoded preview plus the numbers a client needs to align it.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderResult {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Canvas height minus the row on which design-space `y = 0` lands.
    pub vertical_origin_offset_px: f64,
    pub pixels_per_mm: f64,
}

impl RenderResult {
    /// Density rounded to whole pixels per millimeter.
    pub fn pixels_per_unit(&self) -> u32 {
        self.pixels_per_mm.round().max(0.0) as u32
    }

    pub fn metadata(&self, url: impl Into<String>) -> RenderMetadata {
        RenderMetadata {
            url: url.into(),
            vertical_origin_offset_px: self.vertical_origin_offset_px,
            pixels_per_unit: self.pixels_per_unit(),
            pixels_per_mm: self.pixels_per_mm,
        }
    }
}

/// Client-facing description of a published preview.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMetadata {
    pub url: String,
    pub vertical_origin_offset_px: f64,
    pub pixels_per_unit: u32,
    pub pixels_per_mm: f64,
}

/// Fitted, placed geometry of one frame front in canvas pixels.
#[derive(Clone, Debug)]
pub struct FrameGeometry {
    pub placement: Placement,
    pub outer_left: Vec<CubicBez>,
    pub outer_right: Vec<CubicBez>,
    pub lens_left: Vec<CubicBez>,
    pub lens_right: Vec<CubicBez>,
}

impl FrameGeometry {
    pub fn outline(&self) -> BezPath {
        outline_path(&self.outer_left, &self.outer_right)
    }

    pub fn lenses(&self) -> BezPath {
        closed_runs_path([self.lens_left.as_slice(), self.lens_right.as_slice()])
    }
}

/// Scale, mirror, place and fit the front of `design`.
///
/// The left outer curve's scaled extents decide the placement of every curve.
pub fn layout_front(design: &DesignRecord, config: &RenderConfig) -> EyeframeResult<FrameGeometry> {
    let outer = scale(&design.outer_curve_mm(config.units_per_mm), config.pixels_per_mm);
    let lens = scale(&design.lens_mm(config.units_per_mm), config.pixels_per_mm);
    outer.validate(false, "front.outer_curve")?;
    lens.validate(true, "front.lens")?;

    let placement = Placement::from_reference(&outer, config.origin_x());
    let outer = MirroredPair::from_scaled(&outer, placement);
    let lens = MirroredPair::from_scaled(&lens, placement);

    Ok(FrameGeometry {
        placement,
        outer_left: fit_beziers(&outer.left, FitOptions::OPEN_HORIZONTAL_ENDS)?,
        outer_right: fit_beziers(&outer.right, FitOptions::OPEN_HORIZONTAL_ENDS)?,
        lens_left: fit_beziers(&lens.left, FitOptions::CLOSED)?,
        lens_right: fit_beziers(&lens.right, FitOptions::CLOSED)?,
    })
}

fn load_texture(
    loader: &dyn TextureLoader,
    locator: Option<&str>,
) -> EyeframeResult<Option<image::RgbaImage>> {
    let Some(locator) = locator else {
        return Ok(None);
    };
    match loader.load(locator) {
        Ok(img) => Ok(Some(img)),
        Err(e) if e.is_recoverable() => {
            tracing::warn!(locator, error = %e, "texture unavailable, using flat fill");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Render the front preview of `design` in `material` as PNG bytes.
///
/// Stages: validate, lay out and fit, fill the outline, carve lenses, composite the texture,
/// clear the lenses, encode. `cancel` is checked before each stage.
#[tracing::instrument(
    skip_all,
    fields(design = %design.id, material = %material.id)
)]
pub fn render(
    design: &DesignRecord,
    material: &MaterialRecord,
    config: &RenderConfig,
    loader: &dyn TextureLoader,
    cancel: &CancelToken,
) -> EyeframeResult<RenderResult> {
    cancel.check("validation")?;
    config.validate()?;
    design.validate()?;
    material.validate()?;

    let appearance = material.appearance();
    let style = FrameStyle {
        fill: appearance.fill,
        background: config.background,
        stroke_width_px: config.stroke_width_px,
        keying: config.keying,
    };
    style.validate()?;

    if !design.front.holes.is_empty() {
        tracing::debug!(
            holes = design.front.holes.len(),
            "front holes are not carved into the preview"
        );
    }

    cancel.check("layout")?;
    let geometry = layout_front(design, config)?;

    cancel.check("fill")?;
    let filled = FilledFrame::new(config.canvas, &geometry.outline(), style)?;

    cancel.check("lens carving")?;
    let carved = filled.carve_lenses(&geometry.lenses())?;

    cancel.check("texture loading")?;
    let texture = load_texture(loader, appearance.texture.as_deref())?;

    cancel.check("texture compositing")?;
    let textured = carved.composite_texture(texture.as_ref(), config.texture_alpha_offset)?;

    cancel.check("transparency")?;
    let resolved = textured.resolve_transparency()?;
    tracing::debug!(
        textured = resolved.textured_pixels(),
        cleared = resolved.cleared_pixels(),
        "composited frame"
    );

    cancel.check("encoding")?;
    let png = encode_png(resolved.image())?;

    let vertical_origin_offset_px =
        f64::from(config.canvas.height) - geometry.placement.origin_row();
    Ok(RenderResult {
        png,
        width: config.canvas.width,
        height: config.canvas.height,
        vertical_origin_offset_px,
        pixels_per_mm: config.pixels_per_mm,
    })
}

/// Render, then publish the PNG to `store` under `{design_id}-{material_id}.png`.
#[tracing::instrument(
    skip_all,
    fields(design = %design.id, material = %material.id)
)]
pub fn render_and_publish(
    design: &DesignRecord,
    material: &MaterialRecord,
    config: &RenderConfig,
    loader: &dyn TextureLoader,
    store: &RenderStore,
    cancel: &CancelToken,
) -> EyeframeResult<RenderMetadata> {
    let result = render(design, material, config, loader, cancel)?;
    cancel.check("publishing")?;
    let url = store.publish(&design.id, &material.id, &result.png)?;
    tracing::info!(%url, "published preview");
    Ok(result.metadata(url))
}

/// One design/material pair for [`render_many`].
#[derive(Clone, Debug)]
pub struct RenderJob {
    pub design: DesignRecord,
    pub material: MaterialRecord,
}

/// Render independent jobs in parallel. Results are returned in job order.
pub fn render_many(
    jobs: &[RenderJob],
    config: &RenderConfig,
    loader: &dyn TextureLoader,
    cancel: &CancelToken,
) -> Vec<EyeframeResult<RenderResult>> {
    tracing::debug!(jobs = jobs.len(), "batch render");
    jobs.par_iter()
        .map(|job| render(&job.design, &job.material, config, loader, cancel))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
