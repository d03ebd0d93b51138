//! Pipeline error types.

use std::time::Duration;

use chatvox_core::ArtifactId;
use chatvox_core::paths::PathError;

/// Errors that can occur in the speech pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    /// The engine ran but reported a failure.
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    /// The engine succeeded without producing any audio.
    #[error("Speech synthesis produced no audio")]
    EmptyAudio,

    /// The engine did not answer in time.
    #[error("Speech synthesis timed out after {0:?}")]
    Timeout(Duration),

    /// The engine could not be started at all.
    #[error("Synthesis engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The artifact is not live (never existed or already settled).
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(ArtifactId),

    /// Scratch directory could not be prepared.
    #[error(transparent)]
    Scratch(#[from] PathError),

    /// IO error (scratch files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
