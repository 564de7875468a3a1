//! Material texture loading.
//!
//! Locators are resolved by the caller's [`TextureLoader`]; the render core never searches for
//! files itself. Every failure surfaces as [`EyeframeError::TextureUnavailable`] so the
//! orchestrator can fall back to the flat fill.

use std::path::{Path, PathBuf};

use crate::assets::decode::decode_texture;
use crate::foundation::error::{EyeframeError, EyeframeResult};

/// Source of decoded material textures.
pub trait TextureLoader: Send + Sync {
    fn load(&self, locator: &str) -> EyeframeResult<image::RgbaImage>;
}

/// Loads textures from files below a root directory.
#[derive(Clone, Debug)]
pub struct FsTextureLoader {
    root: PathBuf,
}

impl FsTextureLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, locator: &str) -> EyeframeResult<PathBuf> {
        let rel = normalize_rel_path(locator)?;
        Ok(self.root.join(Path::new(&rel)))
    }
}

impl TextureLoader for FsTextureLoader {
    fn load(&self, locator: &str) -> EyeframeResult<image::RgbaImage> {
        let path = self.resolve(locator)?;
        let bytes = std::fs::read(&path).map_err(|e| {
            EyeframeError::texture(format!("read texture '{}': {e}", path.display()))
        })?;
        decode_texture(&bytes)
    }
}

/// Normalize a texture locator into a clean relative path.
///
/// Absolute paths and `..` components are rejected.
pub fn normalize_rel_path(source: &str) -> EyeframeResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.starts_with('/') {
        return Err(EyeframeError::texture("texture paths must be relative"));
    }
    if s.is_empty() {
        return Err(EyeframeError::texture("texture path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(EyeframeError::texture("texture paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(EyeframeError::texture(
            "texture path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/texture.rs"]
mod tests;
