//! Settings service - orchestrates settings operations.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;

use crate::ports::{CoreError, RepositoryError, SettingsRepository};
use crate::settings::{TtsSettings, TtsSettingsUpdate, validate_settings};

/// Service for settings operations.
///
/// Keeps an in-memory snapshot so hot paths (one read per chat message)
/// never touch storage. Writes go through the repository first and only
/// then replace the snapshot.
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
    current: RwLock<TtsSettings>,
    write_lock: Mutex<()>,
}

impl SettingsService {
    /// Load the persisted settings and build the service around them.
    ///
    /// Stored settings that cannot be parsed or fail validation are replaced
    /// by defaults. Storage failures are returned.
    pub async fn load(repo: Arc<dyn SettingsRepository>) -> Result<Self, CoreError> {
        let settings = match repo.load().await {
            Ok(settings) => match validate_settings(&settings) {
                Ok(()) => settings,
                Err(e) => {
                    tracing::warn!(error = %e, "Stored settings are invalid, using defaults");
                    TtsSettings::default()
                }
            },
            Err(RepositoryError::Serialization(reason)) => {
                tracing::warn!(error = %reason, "Stored settings are unreadable, using defaults");
                TtsSettings::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self::with_settings(repo, settings))
    }

    /// Build the service around an explicit snapshot without reading storage.
    pub fn with_settings(repo: Arc<dyn SettingsRepository>, settings: TtsSettings) -> Self {
        Self {
            repo,
            current: RwLock::new(settings),
            write_lock: Mutex::new(()),
        }
    }

    /// Current settings snapshot.
    pub fn current(&self) -> TtsSettings {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Update settings with partial changes.
    pub async fn update(&self, update: TtsSettingsUpdate) -> Result<TtsSettings, CoreError> {
        let _guard = self.write_lock.lock().await;

        let mut next = self.current();
        next.merge(&update)?;
        validate_settings(&next)?;
        self.repo.save(&next).await?;

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next.clone();
        tracing::debug!(
            prefix = %next.trigger_prefix,
            voice = %next.selected_voice,
            "Settings updated"
        );
        Ok(next)
    }

    /// Replace settings wholesale (validates first).
    pub async fn save(&self, settings: TtsSettings) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;

        validate_settings(&settings)?;
        self.repo.save(&settings).await?;
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = settings;
        Ok(())
    }
}
