use kurbo::Point;

use super::*;
use crate::render::composite::Region;

const CANVAS: Canvas = Canvas {
    width: 40,
    height: 20,
};
const FILL: Rgba8 = Rgba8::new(120, 40, 10, 255);
const SENTINEL: Rgba8 = Rgba8::new(0, 255, 0, 255);

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(Point::new(x0, y0));
    p.line_to(Point::new(x1, y0));
    p.line_to(Point::new(x1, y1));
    p.line_to(Point::new(x0, y1));
    p.close_path();
    p
}

fn style(keying: KeyingMode) -> FrameStyle {
    FrameStyle {
        fill: FILL,
        background: Rgba8::TRANSPARENT,
        stroke_width_px: 1.0,
        keying,
    }
}

fn outline() -> BezPath {
    rect(2.0, 2.0, 38.0, 18.0)
}

fn lens() -> BezPath {
    rect(14.0, 6.0, 26.0, 14.0)
}

fn texture() -> RgbaImage {
    RgbaImage::from_pixel(CANVAS.width, CANVAS.height, image::Rgba([10, 200, 30, 255]))
}

#[test]
fn region_mask_stages_produce_textured_frame_with_lens_hole() {
    let carved = FilledFrame::new(CANVAS, &outline(), style(KeyingMode::RegionMask))
        .unwrap()
        .carve_lenses(&lens())
        .unwrap();

    let mask = carved.region_mask().expect("region mask mode");
    assert_eq!(mask.get(6, 10), Region::Fill);
    assert_eq!(mask.get(20, 10), Region::Lens);
    assert_eq!(mask.get(0, 0), Region::Background);
    assert_eq!(mask.get(2, 10), Region::Stroke);
    assert_eq!(carved.image().get_pixel(6, 10).0, FILL.to_array());

    let resolved = carved
        .composite_texture(Some(&texture()), 20)
        .unwrap()
        .resolve_transparency()
        .unwrap();
    assert!(resolved.textured_pixels() > 0);
    assert!(resolved.cleared_pixels() > 0);

    let img = resolved.into_image();
    assert_eq!(img.get_pixel(6, 10).0, [10, 200, 30, 235]);
    assert_eq!(img.get_pixel(20, 10).0[3], 0);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
}

#[test]
fn missing_texture_keeps_flat_fill() {
    let resolved = FilledFrame::new(CANVAS, &outline(), style(KeyingMode::RegionMask))
        .unwrap()
        .carve_lenses(&lens())
        .unwrap()
        .composite_texture(None, 20)
        .unwrap()
        .resolve_transparency()
        .unwrap();
    assert_eq!(resolved.textured_pixels(), 0);
    assert_eq!(resolved.image().get_pixel(6, 10).0, FILL.to_array());
    assert_eq!(resolved.image().get_pixel(20, 10).0[3], 0);
}

#[test]
fn color_key_stages_match_region_mask_in_interiors() {
    let keying = KeyingMode::ColorKey {
        lens_sentinel: SENTINEL,
    };
    let carved = FilledFrame::new(CANVAS, &outline(), style(keying))
        .unwrap()
        .carve_lenses(&lens())
        .unwrap();
    assert!(carved.region_mask().is_none());
    assert_eq!(carved.image().get_pixel(20, 10).0, SENTINEL.to_array());

    let img = carved
        .composite_texture(Some(&texture()), 20)
        .unwrap()
        .resolve_transparency()
        .unwrap()
        .into_image();
    assert_eq!(img.get_pixel(6, 10).0, [10, 200, 30, 235]);
    assert_eq!(img.get_pixel(20, 10).0, [0, 0, 0, 0]);
}

#[test]
fn sentinel_equal_to_fill_is_rejected() {
    let keying = KeyingMode::ColorKey { lens_sentinel: FILL };
    let err = FilledFrame::new(CANVAS, &outline(), style(keying)).unwrap_err();
    assert!(matches!(err, EyeframeError::Validation(_)));
}

#[test]
fn translucent_sentinel_is_rejected() {
    let keying = KeyingMode::ColorKey {
        lens_sentinel: Rgba8::new(0, 255, 0, 128),
    };
    let err = FilledFrame::new(CANVAS, &outline(), style(keying)).unwrap_err();
    assert!(matches!(err, EyeframeError::Validation(_)));
}

#[test]
fn color_key_background_equal_to_fill_is_rejected() {
    let keying = KeyingMode::ColorKey {
        lens_sentinel: SENTINEL,
    };
    let st = FrameStyle {
        background: FILL,
        ..style(keying)
    };
    let err = FilledFrame::new(CANVAS, &outline(), st).unwrap_err();
    assert!(matches!(err, EyeframeError::Validation(_)));

    // Region-mask mode tells background from fill without comparing colors.
    let st = FrameStyle {
        background: FILL,
        ..style(KeyingMode::RegionMask)
    };
    let img = FilledFrame::new(CANVAS, &outline(), st)
        .unwrap()
        .carve_lenses(&lens())
        .unwrap()
        .composite_texture(Some(&texture()), 20)
        .unwrap()
        .resolve_transparency()
        .unwrap()
        .into_image();
    assert_eq!(img.get_pixel(0, 0).0, FILL.to_array());
}

#[test]
fn texture_smaller_than_canvas_leaves_fill_outside_its_bounds() {
    let small = RgbaImage::from_pixel(8, 8, image::Rgba([1, 2, 3, 255]));
    let img = FilledFrame::new(CANVAS, &outline(), style(KeyingMode::RegionMask))
        .unwrap()
        .carve_lenses(&lens())
        .unwrap()
        .composite_texture(Some(&small), 20)
        .unwrap()
        .resolve_transparency()
        .unwrap()
        .into_image();
    assert_eq!(img.get_pixel(5, 5).0, [1, 2, 3, 235]);
    assert_eq!(img.get_pixel(30, 15).0, FILL.to_array());
}
