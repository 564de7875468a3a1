use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::StoreConfig;
use crate::foundation::error::{EyeframeError, EyeframeResult};

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Output directory plus the URL prefix clients use to fetch published previews.
#[derive(Clone, Debug)]
pub struct RenderStore {
    dir: PathBuf,
    base_url: String,
}

impl RenderStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(cfg: &StoreConfig) -> Self {
        Self::new(cfg.static_dir.clone(), cfg.base_url.clone())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(design_id: &str, material_id: &str) -> String {
        format!("{design_id}-{material_id}.png")
    }

    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{file_name}", self.base_url.trim_end_matches('/'))
    }

    /// Write `png` as `{design_id}-{material_id}.png` and return its URL.
    ///
    /// The bytes go to a unique temp file in the same directory which is then renamed over the
    /// target, so readers see either the previous file or the complete new one.
    pub fn publish(
        &self,
        design_id: &str,
        material_id: &str,
        png: &[u8],
    ) -> EyeframeResult<String> {
        check_id("design id", design_id)?;
        check_id("material id", material_id)?;

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            EyeframeError::persist(format!("create store dir '{}': {e}", self.dir.display()))
        })?;

        let name = Self::file_name(design_id, material_id);
        let target = self.dir.join(&name);
        let tmp = self.dir.join(format!(
            ".{name}.{}.{}.tmp",
            std::process::id(),
            TEMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));

        if let Err(e) = write_synced(&tmp, png) {
            let _ = std::fs::remove_file(&tmp);
            return Err(EyeframeError::persist(format!(
                "write '{}': {e}",
                tmp.display()
            )));
        }
        if let Err(e) = std::fs::rename(&tmp, &target) {
            let _ = std::fs::remove_file(&tmp);
            return Err(EyeframeError::persist(format!(
                "rename into '{}': {e}",
                target.display()
            )));
        }

        tracing::debug!(path = %target.display(), bytes = png.len(), "published preview");
        Ok(self.url_for(&name))
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = std::fs::File::create(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

fn check_id(what: &str, id: &str) -> EyeframeResult<()> {
    if id.trim().is_empty() {
        return Err(EyeframeError::validation(format!("{what} must be non-empty")));
    }
    if id.contains(['/', '\\']) || id == "." || id == ".." {
        return Err(EyeframeError::validation(format!(
            "{what} '{id}' is not a valid file name component"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/store.rs"]
mod tests;
