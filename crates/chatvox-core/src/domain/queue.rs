//! Observable state of the playback queue.

use serde::{Deserialize, Serialize};

use super::artifact::ArtifactId;

/// What the queue is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueuePhase {
    /// Nothing in flight.
    Idle,
    /// A request is waiting and the worker is about to pick it up.
    Queued,
    /// The synthesis engine is rendering a request.
    Synthesizing,
    /// An artifact was handed to the playback surface and has not settled.
    Delivering,
}

/// Point-in-time view of the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueSnapshot {
    pub phase: QueuePhase,
    pub has_pending: bool,
    pub live_artifact: Option<ArtifactId>,
}

impl QueueSnapshot {
    pub const fn idle() -> Self {
        Self {
            phase: QueuePhase::Idle,
            has_pending: false,
            live_artifact: None,
        }
    }

    pub const fn is_processing(&self) -> bool {
        matches!(
            self.phase,
            QueuePhase::Synthesizing | QueuePhase::Delivering
        )
    }
}
