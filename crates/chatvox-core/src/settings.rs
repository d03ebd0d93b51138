//! Speech settings and their validation.
//!
//! Settings are read at the moment each chat message is evaluated, so a
//! change applies to the next message without restarting anything.

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidVolume, VoiceSelection, Volume};
use crate::filter::PermissionPolicy;

/// Prefix a chat message must start with to be spoken.
pub const DEFAULT_TRIGGER_PREFIX: &str = ">>";

/// Operator-controlled speech settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TtsSettings {
    /// Literal, case-sensitive prefix that marks a message for speech.
    pub trigger_prefix: String,

    /// Only moderators (and VIPs, if enabled) may trigger speech.
    pub only_privileged: bool,

    /// Admit VIPs when `only_privileged` is on.
    pub vip_also_allowed: bool,

    pub selected_voice: VoiceSelection,

    /// Playback volume passed to the playback surface.
    pub volume: Volume,
}

impl Default for TtsSettings {
    fn default() -> Self {
        Self {
            trigger_prefix: DEFAULT_TRIGGER_PREFIX.to_string(),
            only_privileged: true,
            vip_also_allowed: false,
            selected_voice: VoiceSelection::default(),
            volume: Volume::default(),
        }
    }
}

impl TtsSettings {
    pub const fn policy(&self) -> PermissionPolicy {
        PermissionPolicy {
            only_privileged: self.only_privileged,
            vip_also_allowed: self.vip_also_allowed,
        }
    }

    /// Apply a partial update in place.
    ///
    /// Fields absent from the update are left unchanged. The result still
    /// has to pass [`validate_settings`] before it is persisted.
    pub fn merge(&mut self, update: &TtsSettingsUpdate) -> Result<(), SettingsError> {
        if let Some(ref prefix) = update.trigger_prefix {
            self.trigger_prefix.clone_from(prefix);
        }
        if let Some(only) = update.only_privileged {
            self.only_privileged = only;
        }
        if let Some(vip) = update.vip_also_allowed {
            self.vip_also_allowed = vip;
        }
        if let Some(voice) = update.selected_voice {
            self.selected_voice = voice;
        }
        if let Some(volume) = update.volume {
            self.volume =
                Volume::new(volume).map_err(|InvalidVolume(v)| SettingsError::InvalidVolume(v))?;
        }
        Ok(())
    }
}

/// Partial settings update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct TtsSettingsUpdate {
    pub trigger_prefix: Option<String>,
    pub only_privileged: Option<bool>,
    pub vip_also_allowed: Option<bool>,
    pub selected_voice: Option<VoiceSelection>,
    /// Raw 0–100 value; range-checked on merge.
    pub volume: Option<u8>,
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("Trigger prefix cannot be empty")]
    EmptyTriggerPrefix,

    #[error("Volume must be between 0 and 100, got {0}")]
    InvalidVolume(u8),
}

/// Validate settings values.
pub fn validate_settings(settings: &TtsSettings) -> Result<(), SettingsError> {
    // A blank prefix would make every message a trigger
    if settings.trigger_prefix.trim().is_empty() {
        return Err(SettingsError::EmptyTriggerPrefix);
    }

    Ok(())
}
