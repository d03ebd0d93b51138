//! Default locations for scratch audio and persisted settings.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

const APP_DIR: &str = "chatvox";

/// Errors from path resolution and directory preparation.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },
}

/// Directory synthesized artifacts are written to.
///
/// `<cache dir>/chatvox/scratch`, falling back to the system temp dir.
pub fn default_scratch_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("scratch")
}

/// File the speech settings are persisted to.
///
/// `<config dir>/chatvox/settings.json`, falling back to the system temp
/// dir when no config dir exists.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .map_or_else(
            || std::env::temp_dir().join(APP_DIR),
            |dir| dir.join(APP_DIR),
        )
        .join("settings.json")
}

/// Create `path` (and parents) if missing; fail if it exists as a file.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
        return Ok(());
    }

    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
