//! Config command handler.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chatvox_core::paths::default_settings_path;
use chatvox_core::{JsonFileSettingsRepository, SettingsService, TtsSettings};

/// Load the effective settings from `settings_file` or the default location.
pub async fn load(settings_file: Option<PathBuf>) -> Result<TtsSettings> {
    let path = settings_file.unwrap_or_else(default_settings_path);
    tracing::debug!(path = %path.display(), "Reading settings");
    let service = SettingsService::load(Arc::new(JsonFileSettingsRepository::new(path))).await?;
    Ok(service.current())
}

/// Print the effective settings as pretty JSON.
pub async fn execute(settings_file: Option<PathBuf>) -> Result<()> {
    let settings = load(settings_file).await?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load(Some(dir.path().join("absent.json"))).await.unwrap();
        assert_eq!(settings, TtsSettings::default());
    }

    #[tokio::test]
    async fn test_reads_stored_prefix() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"triggerPrefix":"!tts","volume":80}"#).unwrap();

        let settings = load(Some(path)).await.unwrap();
        assert_eq!(settings.trigger_prefix, "!tts");
        assert_eq!(settings.volume.get(), 80);
        assert!(settings.only_privileged);
    }
}
