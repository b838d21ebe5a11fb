//! Photo store boundary: files on disk keyed by matricula.
//!
//! Deleting is always best-effort: a failed cleanup logs a warning and never
//! masks or blocks the primary directory operation.

use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "jpg";

pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(&cfg.photos_dir)
    }

    /// Target path for a matricula, extension fixed.
    pub fn path_for(&self, matricula: &str) -> PathBuf {
        self.dir.join(format!("{matricula}.{DEFAULT_EXTENSION}"))
    }

    /// Persist photo bytes for a matricula and return the written path.
    pub fn save(&self, matricula: &str, bytes: &[u8]) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(matricula);
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Best-effort removal. Failures are logged and swallowed.
    pub fn try_delete(&self, path: &Path) {
        if !path.exists() {
            return;
        }
        if let Err(e) = fs::remove_file(path) {
            warning(format!("Could not remove photo '{}': {e}", path.display()));
        }
    }

    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        fs::read(path).ok()
    }
}
