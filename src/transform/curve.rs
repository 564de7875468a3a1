//! Scale, mirror and canvas placement of design curves.
//!
//! The order matters for symmetry: scale the modelled half, take its extents, mirror the scaled
//! half about `x = 0`, and only then translate both halves by the same [`Placement`].

use crate::foundation::core::{Affine, Point};
use crate::geometry::curve::Curve;
use crate::transform::affine;

/// Multiply every coordinate by `factor`.
pub fn scale(curve: &Curve, factor: f64) -> Curve {
    affine::apply(curve, Affine::scale(factor))
}

/// Minimum x and minimum y over all points. Empty curves yield `(+inf, +inf)`.
pub fn extents_min(curve: &Curve) -> (f64, f64) {
    curve
        .points()
        .iter()
        .fold((f64::INFINITY, f64::INFINITY), |(mx, my), p| {
            (mx.min(p.x), my.min(p.y))
        })
}

/// Reflect every point about the vertical line `x = axis_x`.
pub fn mirror(curve: &Curve, axis_x: f64) -> Curve {
    affine::apply(curve, affine::mirror_x(axis_x))
}

/// Translate every point by `(+origin_x, -vertical_offset)`.
pub fn center(curve: &Curve, origin_x: f64, vertical_offset: f64) -> Curve {
    affine::apply(curve, affine::translate(origin_x, -vertical_offset))
}

/// Shared canvas translation for every curve of one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Canvas column that design-space `x = 0` (the symmetry axis) maps to.
    pub origin_x: f64,
    /// Amount subtracted from every y so the reference curve's lowest y lands on row 0.
    pub vertical_offset: f64,
}

impl Placement {
    /// Derive the placement from the already scaled reference (left outer) curve.
    pub fn from_reference(scaled_reference: &Curve, origin_x: f64) -> Self {
        let (_, min_y) = extents_min(scaled_reference);
        Self {
            origin_x,
            vertical_offset: if min_y.is_finite() { min_y } else { 0.0 },
        }
    }

    /// Canvas row on which design-space `y = 0` lands.
    pub fn origin_row(self) -> f64 {
        -self.vertical_offset
    }

    pub fn place(self, curve: &Curve) -> Curve {
        center(curve, self.origin_x, self.vertical_offset)
    }

    pub fn place_point(self, p: Point) -> Point {
        affine::translate(self.origin_x, -self.vertical_offset) * p
    }
}

/// Left half and its mirror image, both placed on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct MirroredPair {
    pub left: Curve,
    pub right: Curve,
}

impl MirroredPair {
    /// Mirror an already scaled half about `x = 0`, then place both halves.
    pub fn from_scaled(scaled_left: &Curve, placement: Placement) -> Self {
        let scaled_right = mirror(scaled_left, 0.0);
        Self {
            left: placement.place(scaled_left),
            right: placement.place(&scaled_right),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/curve.rs"]
mod tests;
