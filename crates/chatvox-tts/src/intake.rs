//! Chat message evaluation: permission, trigger prefix, normalization and
//! voice resolution.
//!
//! Pure with respect to the queue. The caller decides what to do with a
//! [`IntakeDecision::Speak`] request.

use chatvox_core::{
    ChatEvent, SpeakRequest, TtsSettings, VoiceSelection, Volume, is_allowed, normalize,
};
use serde::{Deserialize, Serialize};

/// What became of an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeOutcome {
    /// The author may not trigger speech.
    Denied,
    /// The message does not start with the trigger prefix.
    NotTriggered,
    /// Nothing speakable was left after stripping and normalization.
    Empty,
    /// A speak request was handed to the queue.
    Enqueued,
}

/// Result of evaluating a message against the current settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeDecision {
    Skip(IntakeOutcome),
    Speak(SpeakRequest),
}

/// Evaluate a chat message.
///
/// Order: permission, then the exact case-sensitive prefix on the untrimmed
/// text, then strip and trim, then normalize. The voice is resolved here so a
/// `random` selection is drawn exactly once per accepted message.
pub fn evaluate(event: &ChatEvent, settings: &TtsSettings) -> IntakeDecision {
    if !is_allowed(event.roles(), settings.policy()) {
        return IntakeDecision::Skip(IntakeOutcome::Denied);
    }

    let Some(rest) = event.text().strip_prefix(settings.trigger_prefix.as_str()) else {
        return IntakeDecision::Skip(IntakeOutcome::NotTriggered);
    };

    prepare(rest.trim(), settings.selected_voice, settings.volume)
}

/// Normalize `text` and build a request, skipping blank results.
///
/// Shared by chat intake and the direct speak entry point.
pub fn prepare(text: &str, voice: VoiceSelection, volume: Volume) -> IntakeDecision {
    if text.is_empty() {
        return IntakeDecision::Skip(IntakeOutcome::Empty);
    }

    SpeakRequest::new(normalize(text), voice.resolve(), volume)
        .map_or(IntakeDecision::Skip(IntakeOutcome::Empty), IntakeDecision::Speak)
}
