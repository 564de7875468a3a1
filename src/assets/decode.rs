use anyhow::Context;

use crate::foundation::error::{EyeframeError, EyeframeResult};

/// Decode any supported image format into straight RGBA8.
pub fn decode_texture(bytes: &[u8]) -> EyeframeResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode texture from memory")
        .map_err(|e| EyeframeError::texture(format!("{e:#}")))?;
    Ok(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
