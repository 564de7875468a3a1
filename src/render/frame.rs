//! Render stages for one frame preview.
//!
//! Each stage consumes the previous one, so the passes can only run in order:
//! [`FilledFrame`] → [`CarvedFrame`] → [`TexturedFrame`] → [`ResolvedFrame`].

use image::RgbaImage;

use crate::config::KeyingMode;
use crate::foundation::core::{BezPath, Canvas, Rgba8};
use crate::foundation::error::{EyeframeError, EyeframeResult};
use crate::foundation::math::{premultiply, unpremultiply_rgba8_in_place};
use crate::render::composite::{self, RegionMask};
use crate::render::raster::{CoverageKind, render_color_layer, render_coverage};

/// Paint settings for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStyle {
    pub fill: Rgba8,
    pub background: Rgba8,
    pub stroke_width_px: f64,
    pub keying: KeyingMode,
}

impl FrameStyle {
    pub fn validate(&self) -> EyeframeResult<()> {
        if let KeyingMode::ColorKey { lens_sentinel } = self.keying {
            if !lens_sentinel.is_opaque() {
                return Err(EyeframeError::validation(
                    "lens sentinel color must be opaque",
                ));
            }
            if self.fill == self.background {
                return Err(EyeframeError::validation(
                    "color keying needs a background color different from the fill color",
                ));
            }
            if lens_sentinel == self.fill {
                return Err(EyeframeError::validation(
                    "lens sentinel color must differ from the fill color",
                ));
            }
            if lens_sentinel == self.background {
                return Err(EyeframeError::validation(
                    "lens sentinel color must differ from the background color",
                ));
            }
            if !self.fill.is_opaque() {
                tracing::warn!(
                    fill = ?self.fill,
                    "color keying with a translucent fill may miss fill pixels"
                );
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
enum RegionKeys {
    Mask {
        mask: RegionMask,
        lens_coverage: Vec<u8>,
    },
    ColorKey {
        fill: Rgba8,
        sentinel: Rgba8,
    },
}

/// Outline filled and stroked with the material color.
#[derive(Clone, Debug)]
pub struct FilledFrame {
    canvas: Canvas,
    style: FrameStyle,
    premul: Vec<u8>,
    fill_coverage: Vec<u8>,
    stroke_coverage: Vec<u8>,
}

impl FilledFrame {
    pub fn new(canvas: Canvas, outline: &BezPath, style: FrameStyle) -> EyeframeResult<Self> {
        canvas.validate()?;
        style.validate()?;
        let premul = render_color_layer(
            canvas,
            outline,
            style.fill,
            style.background,
            style.stroke_width_px,
        )?;

        let (fill_coverage, stroke_coverage) = match style.keying {
            KeyingMode::RegionMask => (
                render_coverage(canvas, outline, CoverageKind::Fill)?,
                render_coverage(canvas, outline, CoverageKind::Stroke(style.stroke_width_px))?,
            ),
            KeyingMode::ColorKey { .. } => (Vec::new(), Vec::new()),
        };

        Ok(Self {
            canvas,
            style,
            premul,
            fill_coverage,
            stroke_coverage,
        })
    }

    /// Record the lens holes. In color-key mode they are painted with the sentinel color.
    pub fn carve_lenses(self, lenses: &BezPath) -> EyeframeResult<CarvedFrame> {
        let Self {
            canvas,
            style,
            mut premul,
            fill_coverage,
            stroke_coverage,
        } = self;

        let lens_coverage = render_coverage(canvas, lenses, CoverageKind::Fill)?;
        let keys = match style.keying {
            KeyingMode::RegionMask => {
                let mask = RegionMask::from_coverage(
                    canvas.width,
                    canvas.height,
                    &fill_coverage,
                    &stroke_coverage,
                    &lens_coverage,
                )?;
                RegionKeys::Mask {
                    mask,
                    lens_coverage,
                }
            }
            KeyingMode::ColorKey { lens_sentinel } => {
                composite::paint_coverage_in_place(
                    &mut premul,
                    &lens_coverage,
                    premultiply(lens_sentinel.to_array()),
                )?;
                RegionKeys::ColorKey {
                    fill: style.fill,
                    sentinel: lens_sentinel,
                }
            }
        };

        unpremultiply_rgba8_in_place(&mut premul);
        let image = RgbaImage::from_raw(canvas.width, canvas.height, premul)
            .ok_or_else(|| EyeframeError::encode("canvas buffer length mismatch"))?;
        Ok(CarvedFrame { image, keys })
    }
}

/// Lens holes recorded; the fill region is still the flat material color.
#[derive(Clone, Debug)]
pub struct CarvedFrame {
    image: RgbaImage,
    keys: RegionKeys,
}

impl CarvedFrame {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// The region mask, when the frame was rendered in region-mask mode.
    pub fn region_mask(&self) -> Option<&RegionMask> {
        match &self.keys {
            RegionKeys::Mask { mask, .. } => Some(mask),
            RegionKeys::ColorKey { .. } => None,
        }
    }

    /// Substitute the texture into the fill region. `None` keeps the flat fill.
    pub fn composite_texture(
        self,
        texture: Option<&RgbaImage>,
        alpha_offset: u8,
    ) -> EyeframeResult<TexturedFrame> {
        let Self { mut image, keys } = self;
        let textured_pixels = match (texture, &keys) {
            (None, _) => 0,
            (Some(tex), RegionKeys::Mask { mask, .. }) => {
                composite::composite_texture_masked(&mut image, mask, tex, alpha_offset)?
            }
            (Some(tex), RegionKeys::ColorKey { fill, .. }) => {
                composite::composite_texture_keyed(&mut image, *fill, tex, alpha_offset)
            }
        };
        Ok(TexturedFrame {
            image,
            keys,
            textured_pixels,
        })
    }
}

/// Texture composited (or skipped); lens holes not yet transparent.
#[derive(Clone, Debug)]
pub struct TexturedFrame {
    image: RgbaImage,
    keys: RegionKeys,
    textured_pixels: usize,
}

impl TexturedFrame {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn textured_pixels(&self) -> usize {
        self.textured_pixels
    }

    /// Turn the lens region fully transparent.
    pub fn resolve_transparency(self) -> EyeframeResult<ResolvedFrame> {
        let Self {
            mut image,
            keys,
            textured_pixels,
        } = self;
        let cleared_pixels = match &keys {
            RegionKeys::Mask { lens_coverage, .. } => {
                composite::punch_lenses_masked(&mut image, lens_coverage)?
            }
            RegionKeys::ColorKey { sentinel, .. } => {
                composite::punch_sentinel(&mut image, *sentinel)
            }
        };
        Ok(ResolvedFrame {
            image,
            textured_pixels,
            cleared_pixels,
        })
    }
}

/// Final straight-alpha RGBA image, ready to encode.
#[derive(Clone, Debug)]
pub struct ResolvedFrame {
    image: RgbaImage,
    textured_pixels: usize,
    cleared_pixels: usize,
}

impl ResolvedFrame {
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn textured_pixels(&self) -> usize {
        self.textured_pixels
    }

    pub fn cleared_pixels(&self) -> usize {
        self.cleared_pixels
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
