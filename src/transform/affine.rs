//! Affine transform helpers.

use crate::foundation::core::{Affine, Point, Vec2};
use crate::geometry::curve::Curve;

/// Reflection about the vertical line `x = axis_x`.
#[inline]
pub fn mirror_x(axis_x: f64) -> Affine {
    Affine::new([-1.0, 0.0, 0.0, 1.0, 2.0 * axis_x, 0.0])
}

#[inline]
pub fn translate(dx: f64, dy: f64) -> Affine {
    Affine::translate(Vec2::new(dx, dy))
}

/// Map every point of `curve` through `xf`, keeping point order.
pub fn apply(curve: &Curve, xf: Affine) -> Curve {
    curve.points().iter().map(|&p: &Point| xf * p).collect()
}
