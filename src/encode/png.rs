use image::{ImageEncoder as _, RgbaImage, codecs::png::PngEncoder};

use crate::foundation::error::{EyeframeError, EyeframeResult};

/// Serialize a straight-alpha RGBA image to PNG bytes.
pub fn encode_png(img: &RgbaImage) -> EyeframeResult<Vec<u8>> {
    let mut out = Vec::with_capacity(img.as_raw().len() / 4);
    PngEncoder::new(&mut out)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| EyeframeError::encode(format!("png encode failed: {e}")))?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
