use std::io::Cursor;

use super::*;

#[test]
fn decode_texture_png_keeps_straight_alpha() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba.clone()).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_texture(&buf).unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.as_raw().as_slice(), src_rgba.as_slice());
}

#[test]
fn corrupt_bytes_are_a_texture_error() {
    let err = decode_texture(b"not an image").unwrap_err();
    assert!(matches!(err, EyeframeError::TextureUnavailable(_)));
    assert!(err.is_recoverable());
}
