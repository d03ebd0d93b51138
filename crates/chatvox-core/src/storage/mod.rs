//! Settings repository implementations.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::ports::{RepositoryError, SettingsRepository};
use crate::settings::TtsSettings;

/// Settings stored as pretty-printed JSON in a single file.
///
/// A missing file reads as defaults. Saves write a sibling temp file and
/// rename it over the target so a crash never leaves half a document.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsRepository {
    path: PathBuf,
}

impl JsonFileSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsRepository for JsonFileSettingsRepository {
    async fn load(&self) -> Result<TtsSettings, RepositoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No settings file, using defaults");
                return Ok(TtsSettings::default());
            }
            Err(e) => return Err(RepositoryError::Storage(e.to_string())),
        };

        serde_json::from_str(&content).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    async fn save(&self, settings: &TtsSettings) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

/// Settings held in memory only. Lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySettingsRepository {
    settings: Mutex<TtsSettings>,
}

impl InMemorySettingsRepository {
    pub fn new(settings: TtsSettings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn load(&self) -> Result<TtsSettings, RepositoryError> {
        Ok(self
            .settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn save(&self, settings: &TtsSettings) -> Result<(), RepositoryError> {
        *self
            .settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = settings.clone();
        Ok(())
    }
}
