//! Speak requests and playback volume.

use serde::{Deserialize, Serialize};

use super::voice::Voice;

/// Playback volume on a 0–100 scale.
///
/// Applied by the playback surface only; synthesis always runs at neutral
/// prosody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Volume(u8);

/// Volume outside 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Volume must be between 0 and 100, got {0}")]
pub struct InvalidVolume(pub u8);

impl Volume {
    pub const MAX: u8 = 100;

    pub const fn new(value: u8) -> Result<Self, InvalidVolume> {
        if value > Self::MAX {
            Err(InvalidVolume(value))
        } else {
            Ok(Self(value))
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u8> for Volume {
    type Error = InvalidVolume;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Volume> for u8 {
    fn from(volume: Volume) -> Self {
        volume.0
    }
}

/// A unit of work for the playback queue.
///
/// The text is already normalized and never blank; the voice is already
/// resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakRequest {
    text: String,
    voice: Voice,
    volume: Volume,
}

impl SpeakRequest {
    /// Build a request, or `None` when the text is blank.
    pub fn new(text: impl Into<String>, voice: Voice, volume: Volume) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text,
            voice,
            volume,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn voice(&self) -> Voice {
        self.voice
    }

    pub const fn volume(&self) -> Volume {
        self.volume
    }
}
