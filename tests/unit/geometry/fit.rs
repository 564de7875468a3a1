use super::*;

const EPS: f64 = 1e-9;

fn curve(pts: &[(f64, f64)]) -> Curve {
    pts.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn assert_close(a: Point, b: Point, eps: f64) {
    assert!(
        (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps,
        "{a:?} != {b:?}"
    );
}

fn assert_chained(segs: &[CubicBez], closed: bool) {
    for w in segs.windows(2) {
        assert_close(w[0].p3, w[1].p0, EPS);
    }
    if closed {
        assert_close(segs[segs.len() - 1].p3, segs[0].p0, 1e-6);
    }
}

#[test]
fn open_square_corner_with_horizontal_ends() {
    let c = curve(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let segs = fit_beziers(&c, FitOptions::OPEN_HORIZONTAL_ENDS).unwrap();

    assert_eq!(segs.len(), 2);
    assert_eq!(segs[0].p1.y, 0.0);
    assert_eq!(segs[1].p2.y, 10.0);
    assert_eq!(segs[0].p0, Point::new(0.0, 0.0));
    assert_eq!(segs[1].p3, Point::new(10.0, 10.0));

    // Corner anchor: midpoint of (20/3, 0) and (10, 10/3).
    assert_close(segs[0].p3, Point::new(25.0 / 3.0, 5.0 / 3.0), EPS);
    assert_chained(&segs, false);
}

#[test]
fn closed_triangle_wraps_back_to_start() {
    let c = curve(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]);
    let segs = fit_beziers(&c, FitOptions::CLOSED).unwrap();

    assert_eq!(segs.len(), 3);
    assert_close(segs[2].p3, segs[0].p0, 1e-6);
    assert_chained(&segs, true);

    // No anchor is an original vertex on a closed curve.
    for s in &segs {
        for p in c.points() {
            assert!(s.p0.distance(*p) > 1e-3);
        }
    }
}

#[test]
fn closed_wrap_anchor_is_midpoint_of_neighbouring_controls() {
    let c = curve(&[(0.0, 0.0), (9.0, 0.0), (9.0, 9.0), (0.0, 9.0)]);
    let segs = fit_beziers(&c, FitOptions::CLOSED).unwrap();
    assert_eq!(segs.len(), 4);
    // Last chord (0,9)->(0,0) has its 2/3 control at (0,3); first chord's 1/3 control is (3,0).
    assert_close(segs[0].p0, Point::new(1.5, 1.5), EPS);
    assert_close(segs[3].p3, Point::new(1.5, 1.5), EPS);
}

#[test]
fn two_point_open_curve_is_a_single_unsmoothed_segment() {
    let c = curve(&[(1.0, 2.0), (7.0, 5.0)]);
    let segs = fit_beziers(&c, FitOptions::OPEN).unwrap();
    assert_eq!(segs.len(), 1);
    assert_eq!(segs[0].p0, Point::new(1.0, 2.0));
    assert_eq!(segs[0].p3, Point::new(7.0, 5.0));
    assert_close(segs[0].p1, Point::new(3.0, 3.0), EPS);
    assert_close(segs[0].p2, Point::new(5.0, 4.0), EPS);

    let flat = fit_beziers(&c, FitOptions::OPEN_HORIZONTAL_ENDS).unwrap();
    assert_eq!(flat[0].p1.y, 2.0);
    assert_eq!(flat[0].p2.y, 5.0);
    assert_eq!(flat[0].p0, Point::new(1.0, 2.0));
    assert_eq!(flat[0].p3, Point::new(7.0, 5.0));
}

#[test]
fn segment_counts_follow_point_counts() {
    let pts: Vec<(f64, f64)> = (0..9)
        .map(|i| {
            let t = f64::from(i) * 0.7;
            (t.cos() * 20.0 + f64::from(i), t.sin() * 11.0)
        })
        .collect();
    for n in 3..=pts.len() {
        let c = curve(&pts[..n]);
        let open = fit_beziers(&c, FitOptions::OPEN).unwrap();
        assert_eq!(open.len(), n - 1);
        assert_eq!(open[0].p0, c.points()[0]);
        assert_eq!(open[n - 2].p3, c.points()[n - 1]);
        assert_chained(&open, false);

        let closed = fit_beziers(&c, FitOptions::CLOSED).unwrap();
        assert_eq!(closed.len(), n);
        assert_chained(&closed, true);
    }
}

#[test]
fn horizontal_ends_are_ignored_for_closed_curves() {
    let c = curve(&[(0.0, 0.0), (10.0, 4.0), (5.0, 10.0)]);
    let plain = fit_beziers(&c, FitOptions::CLOSED).unwrap();
    let forced = fit_beziers(
        &c,
        FitOptions {
            closed: true,
            force_horizontal_ends: true,
        },
    )
    .unwrap();
    assert_eq!(plain, forced);
}

#[test]
fn degenerate_curves_are_rejected() {
    assert!(fit_beziers(&curve(&[(0.0, 0.0)]), FitOptions::OPEN).is_err());
    assert!(fit_beziers(&curve(&[(0.0, 0.0), (1.0, 1.0)]), FitOptions::CLOSED).is_err());
    assert!(fit_beziers(&Curve::default(), FitOptions::OPEN).is_err());
}

#[test]
fn reverse_run_traverses_the_same_outline_backwards() {
    let c = curve(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 12.0)]);
    let segs = fit_beziers(&c, FitOptions::OPEN).unwrap();
    let rev = reverse_run(&segs);

    assert_eq!(rev.len(), segs.len());
    assert_eq!(rev[0].p0, segs[2].p3);
    assert_eq!(rev[0].p1, segs[2].p2);
    assert_eq!(rev[0].p2, segs[2].p1);
    assert_eq!(rev[2].p3, segs[0].p0);
    assert_chained(&rev, false);
    assert_eq!(reverse_run(&rev), segs);
}
