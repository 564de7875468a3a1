use crate::foundation::error::{EyeframeError, EyeframeResult};

pub use kurbo::{Affine, BezPath, CubicBez, Point, Vec2};

/// Largest canvas edge the CPU rasterizer can address.
pub const MAX_CANVAS_EDGE: u32 = u16::MAX as u32;

/// Fixed-size raster target in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 2000,
            height: 900,
        }
    }
}

impl Canvas {
    pub fn validate(self) -> EyeframeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(EyeframeError::validation("canvas dimensions must be > 0"));
        }
        if self.width > MAX_CANVAS_EDGE || self.height > MAX_CANVAS_EDGE {
            return Err(EyeframeError::validation(format!(
                "canvas {}x{} exceeds the rasterizer limit of {MAX_CANVAS_EDGE}px per edge",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

impl From<image::Rgba<u8>> for Rgba8 {
    fn from(px: image::Rgba<u8>) -> Self {
        Self::from(px.0)
    }
}

impl From<Rgba8> for image::Rgba<u8> {
    fn from(c: Rgba8) -> Self {
        image::Rgba(c.to_array())
    }
}

/// Ordered pair of points with clamped parametric interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub p0: Point,
    pub p1: Point,
}

impl Line {
    pub fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    /// Point at fraction `t` from `p0` to `p1`. `t <= 0` yields `p0`, `t >= 1` yields `p1`.
    pub fn point_at(self, t: f64) -> Point {
        if t <= 0.0 {
            return self.p0;
        }
        if t >= 1.0 {
            return self.p1;
        }
        Point::new(
            self.p0.x + t * (self.p1.x - self.p0.x),
            self.p0.y + t * (self.p1.y - self.p0.y),
        )
    }

    pub fn midpoint(self) -> Point {
        self.point_at(0.5)
    }
}

impl From<Line> for kurbo::Line {
    fn from(l: Line) -> Self {
        kurbo::Line::new(l.p0, l.p1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
