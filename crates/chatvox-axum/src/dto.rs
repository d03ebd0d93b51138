//! Wire types for the HTTP surface.

use chatvox_core::{ArtifactId, PlaybackCommand, VoiceSelection, Volume};
use chatvox_tts::IntakeOutcome;
use serde::{Deserialize, Serialize};

/// Path the artifact bytes are served under.
pub const AUDIO_ROUTE_PREFIX: &str = "/audio";

/// URL of an artifact, relative to the server root.
///
/// The timestamp query defeats any cache keyed on the full URL; the handler
/// ignores it.
pub fn artifact_url(id: &ArtifactId) -> String {
    format!(
        "{AUDIO_ROUTE_PREFIX}/{}?t={}",
        id.file_name(),
        chrono::Utc::now().timestamp_millis()
    )
}

/// A playback command as sent to browser surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEventDto {
    DeliverArtifact {
        #[serde(rename = "artifactId")]
        artifact_id: ArtifactId,
        url: String,
        volume: Volume,
    },
    AbortPlayback,
    ReportError {
        message: String,
        details: String,
    },
}

impl PlaybackEventDto {
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::DeliverArtifact { .. } => "deliver_artifact",
            Self::AbortPlayback => "abort_playback",
            Self::ReportError { .. } => "report_error",
        }
    }
}

impl From<PlaybackCommand> for PlaybackEventDto {
    fn from(command: PlaybackCommand) -> Self {
        match command {
            PlaybackCommand::DeliverArtifact {
                artifact_id,
                volume,
            } => Self::DeliverArtifact {
                url: artifact_url(&artifact_id),
                artifact_id,
                volume,
            },
            PlaybackCommand::AbortPlayback => Self::AbortPlayback,
            PlaybackCommand::ReportError { message, details } => {
                Self::ReportError { message, details }
            }
        }
    }
}

/// Body of `POST /api/playback/settled`.
///
/// Kept as a plain string so malformed ids are a no-op rather than a 4xx.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettledRequest {
    pub artifact_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SettledResponse {
    pub accepted: bool,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub moderator: bool,
    #[serde(default)]
    pub vip: bool,
}

/// Body of `POST /api/speak`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakTextRequest {
    pub text: String,
    #[serde(default)]
    pub voice: Option<VoiceSelection>,
    /// 0–100; checked by the handler.
    #[serde(default)]
    pub volume: Option<u8>,
}

/// Response for endpoints that feed the queue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutcomeResponse {
    pub outcome: IntakeOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deliver_gets_a_cache_busting_url() {
        let id = ArtifactId::new("abc").unwrap();
        let dto = PlaybackEventDto::from(PlaybackCommand::DeliverArtifact {
            artifact_id: id,
            volume: Volume::default(),
        });
        let PlaybackEventDto::DeliverArtifact { url, .. } = &dto else {
            panic!("wrong variant");
        };
        assert!(url.starts_with("/audio/abc.mp3?t="));

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["type"], "deliver_artifact");
        assert_eq!(json["artifactId"], "abc");
    }
}
