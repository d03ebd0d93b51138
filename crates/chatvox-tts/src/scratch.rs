//! Scratch directory for synthesized artifacts.

use std::path::{Path, PathBuf};

use chatvox_core::ArtifactId;
use chatvox_core::paths::ensure_directory;
use tracing::{debug, warn};

use crate::error::TtsError;

const ARTIFACT_EXTENSION: &str = "mp3";

/// Directory holding `<artifact-id>.mp3` files.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// Use `root` as the scratch directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, TtsError> {
        let root = root.into();
        ensure_directory(&root)?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Location of the artifact with the given id.
    pub fn artifact_path(&self, id: &ArtifactId) -> PathBuf {
        self.root.join(id.file_name())
    }

    /// Remove stray `*.mp3` files left behind by an earlier run.
    ///
    /// Other files are left alone. Returns how many files were removed.
    pub fn sweep(&self) -> usize {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.root.display(), error = %e, "Cannot read scratch directory");
                return 0;
            }
        };

        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            let is_artifact = path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(ARTIFACT_EXTENSION));
            if !is_artifact {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove stray artifact"),
            }
        }

        if removed > 0 {
            debug!(removed, dir = %self.root.display(), "Swept scratch directory");
        }
        removed
    }
}

/// Delete a scratch file, tolerating it being gone already.
pub(crate) fn remove_quietly(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to delete scratch file"),
    }
}
