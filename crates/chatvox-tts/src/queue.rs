//! Single-flight playback queue: the pipeline's core state machine.
//!
//! ```text
//!   Idle ──enqueue──► Synthesizing ──ok──► Delivering ──settled──► Idle
//!    ▲                     │                    │
//!    └──────── error ──────┘                    │
//!    ▲                                          │
//!    └──────────── enqueue (preempt) ◄──────────┘
//! ```
//!
//! At most one request is pending and at most one is in flight. A new
//! request always wins: anything queued is dropped, anything synthesizing or
//! playing is preempted with an `AbortPlayback`, and the newcomer starts
//! immediately.
//!
//! Synthesis is never cancelled. Every synthesis job carries a ticket; when
//! a job finishes with a ticket that is no longer current, its artifact is
//! deleted instead of delivered.
//!
//! All transitions run under one mutex. Playback commands are sent while
//! the lock is held so the surface observes them in transition order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chatvox_core::{
    ArtifactId, PlaybackCommand, PlaybackSurfacePort, QueuePhase, QueueSnapshot, SpeakRequest,
};
use tracing::{debug, info, warn};

use crate::error::TtsError;
use crate::store::{Artifact, ArtifactStore};
use crate::worker::SynthesisWorker;

/// Operator-facing message sent with every synthesis failure.
pub const SYNTHESIS_FAILED_MESSAGE: &str = "Speech synthesis failed";

// ── State ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Synthesizing { ticket: u64 },
    Delivering { ticket: u64, artifact_id: ArtifactId },
}

#[derive(Debug)]
struct QueueState {
    pending: Option<SpeakRequest>,
    phase: Phase,
    next_ticket: u64,
}

impl QueueState {
    const fn new() -> Self {
        Self {
            pending: None,
            phase: Phase::Idle,
            next_ticket: 1,
        }
    }

    const fn is_processing(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    const fn is_current(&self, ticket: u64) -> bool {
        matches!(self.phase, Phase::Synthesizing { ticket: t } if t == ticket)
    }

    /// Pop the pending request and mark it in flight, if idle.
    fn take_next(&mut self) -> Option<Job> {
        if self.is_processing() {
            return None;
        }
        let request = self.pending.take()?;
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.phase = Phase::Synthesizing { ticket };
        Some(Job { ticket, request })
    }
}

/// A request that has been handed to the worker.
#[derive(Debug)]
struct Job {
    ticket: u64,
    request: SpeakRequest,
}

// ── Queue ──────────────────────────────────────────────────────────

struct Inner {
    state: Mutex<QueueState>,
    worker: SynthesisWorker,
    store: Arc<ArtifactStore>,
    surface: Arc<dyn PlaybackSurfacePort>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Newest-wins playback queue.
///
/// Cheap to clone; clones share state. Transitions that start synthesis
/// spawn onto the current Tokio runtime and must be called from within one.
#[derive(Clone)]
pub struct SingleFlightQueue {
    inner: Arc<Inner>,
}

impl SingleFlightQueue {
    pub fn new(
        worker: SynthesisWorker,
        store: Arc<ArtifactStore>,
        surface: Arc<dyn PlaybackSurfacePort>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(QueueState::new()),
                worker,
                store,
                surface,
            }),
        }
    }

    /// Accept a request, preempting anything queued or in flight.
    pub fn enqueue(&self, request: SpeakRequest) {
        let mut state = self.inner.lock();

        if state.pending.take().is_some() {
            debug!("Dropping queued request in favour of a newer one");
        }

        let evicted = match std::mem::replace(&mut state.phase, Phase::Idle) {
            Phase::Idle => None,
            Phase::Synthesizing { ticket } => {
                info!(ticket, "Preempting synthesis");
                self.inner.surface.send(PlaybackCommand::AbortPlayback);
                None
            }
            Phase::Delivering {
                ticket,
                artifact_id,
            } => {
                info!(ticket, %artifact_id, "Preempting playback");
                self.inner.surface.send(PlaybackCommand::AbortPlayback);
                Some(artifact_id)
            }
        };

        state.pending = Some(request);
        let job = state.take_next();
        drop(state);

        if let Some(artifact_id) = evicted {
            self.inner.store.remove(&artifact_id);
        }
        if let Some(job) = job {
            self.spawn_synthesis(job);
        }
    }

    /// Start the pending request if nothing is in flight.
    ///
    /// Every other transition already advances on its own; calling this
    /// is only needed after external changes and is always safe.
    pub fn advance(&self) {
        let job = self.inner.lock().take_next();
        if let Some(job) = job {
            self.spawn_synthesis(job);
        }
    }

    /// The playback surface finished with `artifact_id` (played, failed or
    /// aborted).
    ///
    /// Only a signal for the artifact currently being delivered has an
    /// effect; duplicates and signals for preempted artifacts are no-ops.
    /// Returns whether the signal was accepted.
    pub fn on_playback_settled(&self, artifact_id: &ArtifactId) -> bool {
        let mut state = self.inner.lock();

        let matches_live = matches!(
            &state.phase,
            Phase::Delivering { artifact_id: live, .. } if live == artifact_id
        );
        if !matches_live {
            drop(state);
            debug!(%artifact_id, "Ignoring settle for an artifact that is not live");
            return false;
        }

        state.phase = Phase::Idle;
        let job = state.take_next();
        drop(state);

        self.inner.store.remove(artifact_id);
        debug!(%artifact_id, "Playback settled");
        if let Some(job) = job {
            self.spawn_synthesis(job);
        }
        true
    }

    /// Point-in-time view of the queue.
    pub fn snapshot(&self) -> QueueSnapshot {
        let state = self.inner.lock();
        let (phase, live_artifact) = match &state.phase {
            Phase::Idle if state.pending.is_some() => (QueuePhase::Queued, None),
            Phase::Idle => (QueuePhase::Idle, None),
            Phase::Synthesizing { .. } => (QueuePhase::Synthesizing, None),
            Phase::Delivering { artifact_id, .. } => {
                (QueuePhase::Delivering, Some(artifact_id.clone()))
            }
        };
        QueueSnapshot {
            phase,
            has_pending: state.pending.is_some(),
            live_artifact,
        }
    }

    /// Drop everything: pending work, the live artifact, and any result
    /// still on its way back from the engine.
    pub fn clear(&self) {
        let mut state = self.inner.lock();
        state.pending = None;
        let evicted = match std::mem::replace(&mut state.phase, Phase::Idle) {
            Phase::Delivering { artifact_id, .. } => Some(artifact_id),
            Phase::Idle | Phase::Synthesizing { .. } => None,
        };
        drop(state);

        if let Some(artifact_id) = evicted {
            self.inner.surface.send(PlaybackCommand::AbortPlayback);
            self.inner.store.remove(&artifact_id);
        }
    }

    fn spawn_synthesis(&self, job: Job) {
        let queue = self.clone();
        tokio::spawn(async move {
            let Job { ticket, request } = job;
            debug!(ticket, voice = %request.voice(), "Synthesis started");
            let result = queue
                .inner
                .worker
                .synthesize(request.text(), request.voice())
                .await;
            queue.on_synthesized(ticket, &request, result);
        });
    }

    /// Resume after the worker returns for `ticket`.
    fn on_synthesized(
        &self,
        ticket: u64,
        request: &SpeakRequest,
        result: Result<Artifact, TtsError>,
    ) {
        let mut state = self.inner.lock();

        if !state.is_current(ticket) {
            drop(state);
            match result {
                Ok(artifact) => {
                    debug!(ticket, artifact_id = %artifact.id, "Synthesis finished after preemption");
                    self.inner.store.discard(&artifact);
                }
                Err(e) => debug!(ticket, error = %e, "Preempted synthesis failed"),
            }
            return;
        }

        match result {
            Ok(artifact) => {
                let artifact_id = artifact.id.clone();
                self.inner.store.register(artifact);
                state.phase = Phase::Delivering {
                    ticket,
                    artifact_id: artifact_id.clone(),
                };
                self.inner.surface.send(PlaybackCommand::DeliverArtifact {
                    artifact_id,
                    volume: request.volume(),
                });
            }
            Err(e) => {
                warn!(ticket, error = %e, "Speech synthesis failed");
                self.inner.surface.send(PlaybackCommand::ReportError {
                    message: SYNTHESIS_FAILED_MESSAGE.to_string(),
                    details: e.to_string(),
                });
                state.phase = Phase::Idle;
                let job = state.take_next();
                drop(state);
                if let Some(job) = job {
                    self.spawn_synthesis(job);
                }
            }
        }
    }
}
