//! CPU rasterization of frame paths with `vello_cpu`.
//!
//! The color layer holds the filled and stroked outline. Coverage layers rasterize a single path
//! in opaque white so the alpha channel is the per-pixel coverage the region mask is built from.

use crate::foundation::core::{BezPath, Canvas, Rgba8};
use crate::foundation::error::{EyeframeError, EyeframeResult};
use crate::render::path::bezpath_to_cpu;

/// How a coverage layer rasterizes its path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CoverageKind {
    /// Interior under the non-zero rule.
    Fill,
    /// Stroke of the given width in pixels.
    Stroke(f64),
}

fn canvas_u16(canvas: Canvas) -> EyeframeResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| EyeframeError::encode("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| EyeframeError::encode("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn render_cpu(
    canvas: Canvas,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) -> EyeframeResult<vello_cpu::Pixmap> {
    let (w, h) = canvas_u16(canvas)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_fill_rule(vello_cpu::peniko::Fill::NonZero);
    draw(&mut ctx);
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

/// Premultiplied RGBA8 pixels of `background`, then `outline` filled and stroked with `fill`.
pub fn render_color_layer(
    canvas: Canvas,
    outline: &BezPath,
    fill: Rgba8,
    background: Rgba8,
    stroke_width_px: f64,
) -> EyeframeResult<Vec<u8>> {
    let cpu_path = bezpath_to_cpu(outline);
    let has_path = !outline.elements().is_empty();
    let pixmap = render_cpu(canvas, |ctx| {
        if background.a > 0 {
            ctx.set_paint(cpu_color(background));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(canvas.width),
                f64::from(canvas.height),
            ));
        }
        if has_path {
            ctx.set_paint(cpu_color(fill));
            ctx.fill_path(&cpu_path);
            if stroke_width_px > 0.0 {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke_width_px));
                ctx.stroke_path(&cpu_path);
            }
        }
    })?;
    Ok(pixmap.data_as_u8_slice().to_vec())
}

/// Per-pixel coverage (0..=255) of `path`, one byte per pixel in row-major order.
pub fn render_coverage(
    canvas: Canvas,
    path: &BezPath,
    kind: CoverageKind,
) -> EyeframeResult<Vec<u8>> {
    let empty = match kind {
        CoverageKind::Fill => path.elements().is_empty(),
        CoverageKind::Stroke(width) => path.elements().is_empty() || width <= 0.0,
    };
    if empty {
        canvas_u16(canvas)?;
        return Ok(vec![0u8; canvas.pixel_count()]);
    }

    let cpu_path = bezpath_to_cpu(path);
    let pixmap = render_cpu(canvas, |ctx| {
        ctx.set_paint(cpu_color(Rgba8::new(255, 255, 255, 255)));
        match kind {
            CoverageKind::Fill => ctx.fill_path(&cpu_path),
            CoverageKind::Stroke(width) => {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
                ctx.stroke_path(&cpu_path);
            }
        }
    })?;

    Ok(pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
