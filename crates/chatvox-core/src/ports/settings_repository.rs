//! Settings repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::settings::TtsSettings;

/// Persistence for the speech settings as a whole.
///
/// Implementations handle serialization internally.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load settings.
    ///
    /// Returns defaults if none are stored.
    async fn load(&self) -> Result<TtsSettings, RepositoryError>;

    /// Save settings.
    async fn save(&self, settings: &TtsSettings) -> Result<(), RepositoryError>;
}
