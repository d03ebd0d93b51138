//! `TtsService`, the facade adapters talk to.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chatvox_core::{
    ArtifactId, ChatEvent, IdGenerator, PlaybackSurfacePort, QueueSnapshot, SettingsService,
    TtsSettings, VoiceSelection, Volume,
};
use tracing::{debug, info};

use crate::backend::SynthesisEngine;
use crate::error::TtsError;
use crate::intake::{self, IntakeDecision, IntakeOutcome};
use crate::queue::SingleFlightQueue;
use crate::scratch::ScratchDir;
use crate::store::ArtifactStore;
use crate::worker::SynthesisWorker;

/// Runtime configuration of the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub scratch_dir: PathBuf,
    /// Watchdog for a single engine call. `None` waits forever.
    pub synthesis_timeout: Option<Duration>,
}

/// Entry points for chat messages, direct speech and playback signals.
pub struct TtsService {
    settings: Arc<SettingsService>,
    queue: SingleFlightQueue,
    store: Arc<ArtifactStore>,
    scratch: ScratchDir,
}

impl TtsService {
    /// Wire the pipeline together.
    ///
    /// Prepares the scratch directory and sweeps artifacts left by an
    /// earlier run.
    pub fn new(
        config: &PipelineConfig,
        settings: Arc<SettingsService>,
        engine: Arc<dyn SynthesisEngine>,
        ids: Arc<dyn IdGenerator>,
        surface: Arc<dyn PlaybackSurfacePort>,
    ) -> Result<Self, TtsError> {
        let scratch = ScratchDir::open(&config.scratch_dir)?;
        let swept = scratch.sweep();
        if swept > 0 {
            info!(swept, dir = %scratch.path().display(), "Removed stale artifacts");
        }

        let store = Arc::new(ArtifactStore::new());
        let worker = SynthesisWorker::new(engine, ids, scratch.clone())
            .with_timeout(config.synthesis_timeout);
        let queue = SingleFlightQueue::new(worker, Arc::clone(&store), surface);

        Ok(Self {
            settings,
            queue,
            store,
            scratch,
        })
    }

    /// Handle a message from the chat source.
    pub fn on_chat_message(&self, event: &ChatEvent) -> IntakeOutcome {
        let settings = self.settings.current();
        let outcome = self.submit(intake::evaluate(event, &settings));
        debug!(id = event.id(), author = event.author(), ?outcome, "Chat message evaluated");
        outcome
    }

    /// Speak `text` directly, bypassing prefix and permission checks.
    ///
    /// Missing voice and volume fall back to the current settings.
    pub fn speak(
        &self,
        text: &str,
        voice: Option<VoiceSelection>,
        volume: Option<Volume>,
    ) -> IntakeOutcome {
        let settings = self.settings.current();
        let decision = intake::prepare(
            text.trim(),
            voice.unwrap_or(settings.selected_voice),
            volume.unwrap_or(settings.volume),
        );
        self.submit(decision)
    }

    fn submit(&self, decision: IntakeDecision) -> IntakeOutcome {
        match decision {
            IntakeDecision::Skip(outcome) => outcome,
            IntakeDecision::Speak(request) => {
                self.queue.enqueue(request);
                IntakeOutcome::Enqueued
            }
        }
    }

    /// Settled signal from the playback surface. Idempotent.
    pub fn report_settled(&self, artifact_id: &ArtifactId) -> bool {
        self.queue.on_playback_settled(artifact_id)
    }

    /// Bytes of a live artifact.
    pub async fn open_artifact(&self, artifact_id: &ArtifactId) -> Result<Vec<u8>, TtsError> {
        self.store.read(artifact_id).await
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.queue.snapshot()
    }

    pub fn settings(&self) -> &Arc<SettingsService> {
        &self.settings
    }

    pub fn current_settings(&self) -> TtsSettings {
        self.settings.current()
    }

    /// Drop queued and live work and sweep the scratch directory.
    pub fn shutdown(&self) {
        self.queue.clear();
        self.store.clear();
        let swept = self.scratch.sweep();
        info!(swept, "Speech pipeline stopped");
    }
}
