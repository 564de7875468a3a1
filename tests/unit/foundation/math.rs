use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn unpremultiply_keeps_opaque_and_clears_transparent() {
    assert_eq!(unpremultiply([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(unpremultiply([10, 20, 30, 0]), [0, 0, 0, 0]);
}

#[test]
fn unpremultiply_recovers_half_alpha_color() {
    // 200 at alpha 128 premultiplies to 100.
    let premul = [100u8, 50, 0, 128];
    let straight = unpremultiply(premul);
    assert_eq!(straight[3], 128);
    assert!((i32::from(straight[0]) - 199).abs() <= 1);
    assert!((i32::from(straight[1]) - 100).abs() <= 1);
    assert_eq!(straight[2], 0);

    let mut buf = premul.to_vec();
    unpremultiply_rgba8_in_place(&mut buf);
    assert_eq!(buf.as_slice(), straight.as_slice());
}

#[test]
fn premultiply_matches_rounded_product() {
    assert_eq!(premultiply([200, 100, 0, 128]), [100, 50, 0, 128]);
    assert_eq!(premultiply([1, 2, 3, 255]), [1, 2, 3, 255]);
    assert_eq!(premultiply([9, 9, 9, 0]), [0, 0, 0, 0]);
}
