//! Ordered point curves and their stored fixed-point form.

use crate::foundation::core::Point;
use crate::foundation::error::{EyeframeError, EyeframeResult};

/// Fewest points an open curve may have.
pub const MIN_OPEN_POINTS: usize = 2;
/// Fewest points a closed curve may have.
pub const MIN_CLOSED_POINTS: usize = 3;

/// Integer coordinate pair as stored in design records.
///
/// Units are `1 / units_per_mm` millimeters (hundredths by default). Serializes as `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FixedPoint(pub i32, pub i32);

impl FixedPoint {
    pub fn to_mm(self, units_per_mm: u32) -> Point {
        let scale = f64::from(units_per_mm);
        Point::new(f64::from(self.0) / scale, f64::from(self.1) / scale)
    }
}

/// Ordered sequence of points in millimeters (or canvas pixels once scaled).
///
/// Whether the curve is open or closed is decided by the consumer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curve(Vec<Point>);

impl Curve {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    pub fn from_fixed(points: &[FixedPoint], units_per_mm: u32) -> Self {
        Self(points.iter().map(|p| p.to_mm(units_per_mm)).collect())
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the point count against the open/closed minimum and reject non-finite points.
    pub fn validate(&self, closed: bool, what: &str) -> EyeframeResult<()> {
        validate_shape(self.0.len(), closed, what)?;
        if self.0.iter().any(|p| !p.is_finite()) {
            return Err(EyeframeError::validation(format!(
                "{what} contains a non-finite point"
            )));
        }
        Ok(())
    }
}

impl From<Vec<Point>> for Curve {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

impl FromIterator<Point> for Curve {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub(crate) fn validate_shape(len: usize, closed: bool, what: &str) -> EyeframeResult<()> {
    let (min, kind) = if closed {
        (MIN_CLOSED_POINTS, "closed")
    } else {
        (MIN_OPEN_POINTS, "open")
    };
    if len < min {
        return Err(EyeframeError::validation(format!(
            "{what} is a {kind} curve with {len} point(s); at least {min} required"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/curve.rs"]
mod tests;
