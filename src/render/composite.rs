//! Pixel passes that merge the material texture into the frame and open the lens holes.
//!
//! Two flavours exist. The region-mask passes consult an explicit per-pixel [`Region`] and lens
//! coverage buffer. The color-key passes match exact pixel colors against the fill color or a
//! sentinel; they only work when no other drawing step can produce those colors.

use image::RgbaImage;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{EyeframeError, EyeframeResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels with an extra coverage/opacity factor.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Paint `color` over a premultiplied buffer wherever `coverage` is non-zero.
pub fn paint_coverage_in_place(
    dst: &mut [u8],
    coverage: &[u8],
    color: PremulRgba8,
) -> EyeframeResult<()> {
    if dst.len() != coverage.len() * 4 {
        return Err(EyeframeError::encode(
            "paint_coverage_in_place expects one coverage byte per rgba8 pixel",
        ));
    }
    for (d, &c) in dst.chunks_exact_mut(4).zip(coverage) {
        if c == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], color, f32::from(c) / 255.0);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// What a canvas pixel belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Background,
    /// Fully covered interior of the frame outline.
    Fill,
    /// Outline stroke and partially covered edge pixels.
    Stroke,
    /// Fully covered interior of a lens hole.
    Lens,
}

/// Per-pixel region classification for one canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionMask {
    width: u32,
    height: u32,
    regions: Vec<Region>,
}

impl RegionMask {
    /// Classify pixels from the fill, stroke, and lens coverage buffers (alpha 0..=255 each).
    pub fn from_coverage(
        width: u32,
        height: u32,
        fill: &[u8],
        stroke: &[u8],
        lens: &[u8],
    ) -> EyeframeResult<Self> {
        let n = width as usize * height as usize;
        if fill.len() != n || stroke.len() != n || lens.len() != n {
            return Err(EyeframeError::encode(
                "region mask expects coverage buffers matching width*height",
            ));
        }

        let regions = fill
            .iter()
            .zip(stroke)
            .zip(lens)
            .map(|((&f, &s), &l)| match (f, s, l) {
                (_, _, 255) => Region::Lens,
                (_, _, 1..=254) | (_, 1..=255, _) => Region::Stroke,
                (255, _, _) => Region::Fill,
                (1..=254, _, _) => Region::Stroke,
                _ => Region::Background,
            })
            .collect();

        Ok(Self {
            width,
            height,
            regions,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Region {
        self.regions[(y as usize) * (self.width as usize) + (x as usize)]
    }

    pub fn count(&self, region: Region) -> usize {
        self.regions.iter().filter(|&&r| r == region).count()
    }

    fn check_dims(&self, img: &RgbaImage) -> EyeframeResult<()> {
        if img.dimensions() != (self.width, self.height) {
            return Err(EyeframeError::encode(format!(
                "region mask {}x{} does not match canvas {}x{}",
                self.width,
                self.height,
                img.width(),
                img.height()
            )));
        }
        Ok(())
    }
}

/// Texture pixel used for a fill pixel: same coordinates, alpha reduced by `alpha_offset`.
///
/// Returns `None` outside the texture bounds so the flat fill stays in place.
fn textured_pixel(
    texture: &RgbaImage,
    x: u32,
    y: u32,
    alpha_offset: u8,
) -> Option<image::Rgba<u8>> {
    let px = texture.get_pixel_checked(x, y)?;
    let [r, g, b, a] = px.0;
    Some(image::Rgba([r, g, b, a.saturating_sub(alpha_offset)]))
}

/// Replace every [`Region::Fill`] pixel with the texture pixel at the same coordinates.
///
/// Returns the number of pixels changed.
pub fn composite_texture_masked(
    img: &mut RgbaImage,
    mask: &RegionMask,
    texture: &RgbaImage,
    alpha_offset: u8,
) -> EyeframeResult<usize> {
    mask.check_dims(img)?;
    let mut changed = 0usize;
    for (x, y, px) in img.enumerate_pixels_mut() {
        if mask.get(x, y) != Region::Fill {
            continue;
        }
        if let Some(t) = textured_pixel(texture, x, y, alpha_offset) {
            *px = t;
            changed += 1;
        }
    }
    Ok(changed)
}

/// Replace every pixel exactly equal to `key` with the texture pixel at the same coordinates.
///
/// Returns the number of pixels changed.
pub fn composite_texture_keyed(
    img: &mut RgbaImage,
    key: Rgba8,
    texture: &RgbaImage,
    alpha_offset: u8,
) -> usize {
    let key: image::Rgba<u8> = key.into();
    let mut changed = 0usize;
    for (x, y, px) in img.enumerate_pixels_mut() {
        if *px != key {
            continue;
        }
        if let Some(t) = textured_pixel(texture, x, y, alpha_offset) {
            *px = t;
            changed += 1;
        }
    }
    changed
}

/// Remove lens coverage from the image (destination-out).
///
/// Fully covered pixels become transparent; partially covered edge pixels keep their color and
/// lose alpha in proportion to coverage. Pixels without lens coverage are untouched.
pub fn punch_lenses_masked(img: &mut RgbaImage, lens_coverage: &[u8]) -> EyeframeResult<usize> {
    if lens_coverage.len() != img.width() as usize * img.height() as usize {
        return Err(EyeframeError::encode(
            "lens coverage does not match canvas size",
        ));
    }
    let mut changed = 0usize;
    for (px, &cov) in img.pixels_mut().zip(lens_coverage) {
        match cov {
            0 => continue,
            255 => *px = image::Rgba([0, 0, 0, 0]),
            _ => {
                let keep = 255u16 - u16::from(cov);
                px.0[3] = mul_div255_u8(u16::from(px.0[3]), keep);
                if px.0[3] == 0 {
                    *px = image::Rgba([0, 0, 0, 0]);
                }
            }
        }
        changed += 1;
    }
    Ok(changed)
}

/// Make every pixel exactly equal to `sentinel` fully transparent.
///
/// Returns the number of pixels changed.
pub fn punch_sentinel(img: &mut RgbaImage, sentinel: Rgba8) -> usize {
    let sentinel: image::Rgba<u8> = sentinel.into();
    let mut changed = 0usize;
    for px in img.pixels_mut() {
        if *px == sentinel {
            *px = image::Rgba([0, 0, 0, 0]);
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
