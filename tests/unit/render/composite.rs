use super::*;

const FILL: Rgba8 = Rgba8::new(20, 20, 20, 255);
const SENTINEL: Rgba8 = Rgba8::new(255, 0, 255, 255);

fn solid(w: u32, h: u32, c: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba(c))
}

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn paint_coverage_only_touches_covered_pixels() {
    let mut buf = vec![10u8, 10, 10, 255, 10, 10, 10, 255, 10, 10, 10, 255];
    paint_coverage_in_place(&mut buf, &[0, 255, 128], [255, 0, 255, 255]).unwrap();
    assert_eq!(&buf[0..4], &[10, 10, 10, 255]);
    assert_eq!(&buf[4..8], &[255, 0, 255, 255]);
    assert_ne!(&buf[8..12], &[10, 10, 10, 255]);
    assert_eq!(buf[11], 255);

    assert!(paint_coverage_in_place(&mut buf, &[0, 0], [0, 0, 0, 0]).is_err());
}

#[test]
fn region_mask_classification() {
    // Pixels: background, fill, fill+stroke, fill edge, lens interior, lens edge.
    let fill = [0u8, 255, 255, 100, 255, 255];
    let stroke = [0u8, 0, 40, 0, 0, 0];
    let lens = [0u8, 0, 0, 0, 255, 90];
    let mask = RegionMask::from_coverage(6, 1, &fill, &stroke, &lens).unwrap();

    assert_eq!(mask.get(0, 0), Region::Background);
    assert_eq!(mask.get(1, 0), Region::Fill);
    assert_eq!(mask.get(2, 0), Region::Stroke);
    assert_eq!(mask.get(3, 0), Region::Stroke);
    assert_eq!(mask.get(4, 0), Region::Lens);
    assert_eq!(mask.get(5, 0), Region::Stroke);
    assert_eq!(mask.count(Region::Fill), 1);

    assert!(RegionMask::from_coverage(2, 2, &fill, &stroke, &lens).is_err());
}

#[test]
fn masked_texture_only_changes_fill_pixels() {
    let mut img = RgbaImage::from_fn(4, 1, |x, _| match x {
        0 => image::Rgba([0, 0, 0, 0]),
        1 | 2 => image::Rgba(FILL.to_array()),
        _ => image::Rgba([20, 20, 20, 120]),
    });
    let before = img.clone();
    // Pixel 2 has the fill color but is part of the stroke.
    let mask =
        RegionMask::from_coverage(4, 1, &[0, 255, 255, 120], &[0, 0, 255, 0], &[0, 0, 0, 0])
            .unwrap();
    let texture = solid(4, 1, [200, 100, 50, 255]);

    let changed = composite_texture_masked(&mut img, &mask, &texture, 20).unwrap();
    assert_eq!(changed, 1);
    assert_eq!(img.get_pixel(1, 0).0, [200, 100, 50, 235]);
    for x in [0, 2, 3] {
        assert_eq!(img.get_pixel(x, 0), before.get_pixel(x, 0));
    }
}

#[test]
fn texture_smaller_than_canvas_keeps_flat_fill_outside() {
    let mut img = solid(3, 1, FILL.to_array());
    let mask = RegionMask::from_coverage(3, 1, &[255; 3], &[0; 3], &[0; 3]).unwrap();
    let texture = solid(1, 1, [1, 2, 3, 10]);

    let changed = composite_texture_masked(&mut img, &mask, &texture, 20).unwrap();
    assert_eq!(changed, 1);
    // Alpha offset saturates at zero.
    assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 0]);
    assert_eq!(img.get_pixel(1, 0).0, FILL.to_array());
    assert_eq!(img.get_pixel(2, 0).0, FILL.to_array());
}

#[test]
fn keyed_texture_matches_exact_fill_color_only() {
    let mut img = RgbaImage::from_fn(4, 1, |x, _| match x {
        0 => image::Rgba(FILL.to_array()),
        1 => image::Rgba([21, 20, 20, 255]),
        2 => image::Rgba(SENTINEL.to_array()),
        _ => image::Rgba([20, 20, 20, 254]),
    });
    let before = img.clone();
    let texture = solid(4, 1, [9, 8, 7, 255]);

    let changed = composite_texture_keyed(&mut img, FILL, &texture, 20);
    assert_eq!(changed, 1);
    assert_eq!(img.get_pixel(0, 0).0, [9, 8, 7, 235]);
    for x in 1..4 {
        assert_eq!(img.get_pixel(x, 0), before.get_pixel(x, 0));
    }
}

#[test]
fn sentinel_pass_only_clears_exact_matches() {
    let mut img = RgbaImage::from_fn(3, 1, |x, _| match x {
        0 => image::Rgba(SENTINEL.to_array()),
        1 => image::Rgba([254, 0, 255, 255]),
        _ => image::Rgba(FILL.to_array()),
    });
    let changed = punch_sentinel(&mut img, SENTINEL);
    assert_eq!(changed, 1);
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(img.get_pixel(1, 0).0, [254, 0, 255, 255]);
    assert_eq!(img.get_pixel(2, 0).0, FILL.to_array());
}

#[test]
fn masked_punch_is_destination_out() {
    let mut img = solid(3, 1, [50, 60, 70, 255]);
    let changed = punch_lenses_masked(&mut img, &[0, 255, 51]).unwrap();
    assert_eq!(changed, 2);
    assert_eq!(img.get_pixel(0, 0).0, [50, 60, 70, 255]);
    assert_eq!(img.get_pixel(1, 0).0, [0, 0, 0, 0]);
    assert_eq!(img.get_pixel(2, 0).0, [50, 60, 70, 204]);

    assert!(punch_lenses_masked(&mut img, &[0]).is_err());
}
