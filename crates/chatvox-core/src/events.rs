//! Commands sent to the playback surface.

use serde::{Deserialize, Serialize};

use crate::domain::{ArtifactId, Volume};

/// A command for the playback surface.
///
/// The surface answers a [`PlaybackCommand::DeliverArtifact`] with exactly
/// one settled signal carrying the same artifact id, whether playback
/// finished, failed, or was aborted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackCommand {
    /// Play the artifact at the given volume.
    DeliverArtifact {
        #[serde(rename = "artifactId")]
        artifact_id: ArtifactId,
        volume: Volume,
    },

    /// Stop whatever is playing now.
    AbortPlayback,

    /// Surface a synthesis failure to the operator.
    ReportError { message: String, details: String },
}

impl PlaybackCommand {
    /// Event name used on streaming transports.
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::DeliverArtifact { .. } => "deliver_artifact",
            Self::AbortPlayback => "abort_playback",
            Self::ReportError { .. } => "report_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deliver_serializes_with_tag() {
        let cmd = PlaybackCommand::DeliverArtifact {
            artifact_id: ArtifactId::new("abc").unwrap(),
            volume: Volume::default(),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "deliver_artifact");
        assert_eq!(json["artifactId"], "abc");
        assert_eq!(json["volume"], 50);
        assert_eq!(cmd.event_name(), "deliver_artifact");
    }
}
