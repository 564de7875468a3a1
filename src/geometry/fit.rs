//! Point curve to cubic Bezier fitting.
//!
//! Every pair of neighbouring curve points contributes one segment whose control points sit at
//! 1/3 and 2/3 along the chord. Anchors between segments are the midpoint of the two control
//! points on either side, which smooths the polyline vertices into a tangent-continuous outline.
//! Open curves keep their true end points as the outer anchors.

use crate::foundation::core::{CubicBez, Line, Point};
use crate::foundation::error::EyeframeResult;
use crate::geometry::curve::{Curve, validate_shape};

const LEADING_CONTROL_T: f64 = 1.0 / 3.0;
const TRAILING_CONTROL_T: f64 = 2.0 / 3.0;

/// How a curve is interpreted when fitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FitOptions {
    /// The last point connects back to the first.
    pub closed: bool,
    /// Open curves only: leave and enter the end points horizontally.
    pub force_horizontal_ends: bool,
}

impl FitOptions {
    pub const OPEN: Self = Self {
        closed: false,
        force_horizontal_ends: false,
    };

    pub const OPEN_HORIZONTAL_ENDS: Self = Self {
        closed: false,
        force_horizontal_ends: true,
    };

    pub const CLOSED: Self = Self {
        closed: true,
        force_horizontal_ends: false,
    };
}

/// Fit `curve` with cubic Bezier segments.
///
/// An open curve of `n` points yields `n - 1` segments, a closed curve yields `n`.
pub fn fit_beziers(curve: &Curve, opts: FitOptions) -> EyeframeResult<Vec<CubicBez>> {
    let pts = curve.points();
    validate_shape(pts.len(), opts.closed, "fitted curve")?;

    let n = pts.len();
    let seg_count = if opts.closed { n } else { n - 1 };

    let mut segs: Vec<CubicBez> = (0..seg_count)
        .map(|i| {
            let chord = Line::new(pts[i], pts[(i + 1) % n]);
            CubicBez::new(
                Point::ZERO,
                chord.point_at(LEADING_CONTROL_T),
                chord.point_at(TRAILING_CONTROL_T),
                Point::ZERO,
            )
        })
        .collect();

    if opts.closed {
        let join = Line::new(segs[seg_count - 1].p2, segs[0].p1).midpoint();
        segs[0].p0 = join;
        segs[seg_count - 1].p3 = join;
    } else {
        segs[0].p0 = pts[0];
        segs[seg_count - 1].p3 = pts[n - 1];
        if opts.force_horizontal_ends {
            segs[0].p1.y = pts[0].y;
            segs[seg_count - 1].p2.y = pts[n - 1].y;
        }
    }

    for i in 0..seg_count - 1 {
        let anchor = Line::new(segs[i].p2, segs[i + 1].p1).midpoint();
        segs[i].p3 = anchor;
        segs[i + 1].p0 = anchor;
    }

    Ok(segs)
}

/// Reverse a segment run so it is traversed end to start.
///
/// Segment order and the control order inside every segment are both reversed, so the result is
/// the same outline drawn backwards.
pub fn reverse_run(segs: &[CubicBez]) -> Vec<CubicBez> {
    segs.iter()
        .rev()
        .map(|s| CubicBez::new(s.p3, s.p2, s.p1, s.p0))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
