//! Synthesis worker: renders one request into a scratch artifact.

use std::sync::Arc;
use std::time::Duration;

use chatvox_core::{IdGenerator, Voice};
use tracing::{debug, warn};

use crate::backend::{Prosody, SynthesisEngine};
use crate::error::TtsError;
use crate::scratch::{ScratchDir, remove_quietly};
use crate::store::Artifact;

/// Turns (text, voice) into an [`Artifact`] on scratch storage.
///
/// Each call gets a fresh id from the injected generator, so a new file
/// never collides with one a preempted request is still cleaning up.
/// Failures are returned to the caller and never retried here.
pub struct SynthesisWorker {
    engine: Arc<dyn SynthesisEngine>,
    ids: Arc<dyn IdGenerator>,
    scratch: ScratchDir,
    timeout: Option<Duration>,
}

impl SynthesisWorker {
    pub fn new(
        engine: Arc<dyn SynthesisEngine>,
        ids: Arc<dyn IdGenerator>,
        scratch: ScratchDir,
    ) -> Self {
        Self {
            engine,
            ids,
            scratch,
            timeout: None,
        }
    }

    /// Treat engine calls running longer than `timeout` as failed.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn synthesize(&self, text: &str, voice: Voice) -> Result<Artifact, TtsError> {
        let id = self.ids.next_id();
        debug!(artifact_id = %id, %voice, engine = self.engine.name(), "Synthesizing");

        let call = self.engine.synthesize(text, voice, Prosody::NEUTRAL);
        let audio = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| TtsError::Timeout(limit))??,
            None => call.await?,
        };

        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        let path = self.scratch.artifact_path(&id);
        if let Err(e) = tokio::fs::write(&path, &audio).await {
            warn!(path = %path.display(), error = %e, "Failed to write artifact");
            remove_quietly(&path);
            return Err(TtsError::Io(e));
        }

        Ok(Artifact {
            id,
            path,
            size: u64::try_from(audio.len()).unwrap_or(u64::MAX),
        })
    }
}
