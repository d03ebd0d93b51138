//! Synthesis engine trait: the opaque text + voice + prosody → audio step.
//!
//! The [`SynthesisWorker`](crate::worker::SynthesisWorker) holds an
//! `Arc<dyn SynthesisEngine>` so engines can be swapped (external command,
//! test doubles) without touching the queue.
//!
//! ## Implementations
//!
//! | Module      | Engine                                   |
//! |-------------|------------------------------------------|
//! | [`command`] | any CLI that writes MP3 to stdout        |

pub mod command;

use chatvox_core::Voice;

use crate::error::TtsError;

pub use command::{CommandEngine, CommandEngineConfig};

// ── Prosody ────────────────────────────────────────────────────────

/// Prosody passed to the engine.
///
/// Synthesis always runs at [`Prosody::NEUTRAL`]. Volume is a playback-time
/// concern and never reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prosody {
    pub rate: &'static str,
    pub volume: &'static str,
    pub pitch: &'static str,
}

impl Prosody {
    pub const NEUTRAL: Self = Self {
        rate: "+0%",
        volume: "+0%",
        pitch: "+0Hz",
    };
}

impl Default for Prosody {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

// ── Engine trait ───────────────────────────────────────────────────

/// Backend-agnostic text-to-speech engine.
///
/// Implementations must be `Send + Sync`; the queue may have a preempted
/// call and a fresh call outstanding at the same time.
#[async_trait::async_trait]
pub trait SynthesisEngine: Send + Sync {
    /// Render `text` with `voice` and return encoded MP3 bytes.
    ///
    /// Never retried by the caller. An empty buffer is treated as a failure
    /// by the worker.
    async fn synthesize(
        &self,
        text: &str,
        voice: Voice,
        prosody: Prosody,
    ) -> Result<Vec<u8>, TtsError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}
