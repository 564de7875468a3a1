//! Bezier runs to drawable paths.

use crate::foundation::core::{BezPath, CubicBez};
use crate::geometry::fit::reverse_run;

/// Append `segs` as one subpath starting at the first segment's start anchor.
fn push_run(path: &mut BezPath, segs: &[CubicBez], start_subpath: bool) {
    let Some(first) = segs.first() else {
        return;
    };
    if start_subpath {
        path.move_to(first.p0);
    }
    for s in segs {
        path.curve_to(s.p1, s.p2, s.p3);
    }
}

/// Closed frame outline: the left run forward, then the right run backwards.
pub fn outline_path(left: &[CubicBez], right: &[CubicBez]) -> BezPath {
    let mut path = BezPath::new();
    if left.is_empty() && right.is_empty() {
        return path;
    }
    push_run(&mut path, left, true);
    push_run(&mut path, &reverse_run(right), left.is_empty());
    path.close_path();
    path
}

/// One closed subpath per lens run.
pub fn closed_runs_path<'a>(runs: impl IntoIterator<Item = &'a [CubicBez]>) -> BezPath {
    let mut path = BezPath::new();
    for run in runs {
        if run.is_empty() {
            continue;
        }
        push_run(&mut path, run, true);
        path.close_path();
    }
    path
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/path.rs"]
mod tests;
