//! Domain types shared by every chatvox crate.
//!
//! These are plain data types with no infrastructure dependencies. Types that
//! carry invariants (non-empty speak text, bounded volume, safe artifact ids)
//! enforce them at construction so the rest of the pipeline never re-checks.

mod artifact;
mod chat;
mod queue;
mod request;
mod voice;

pub use artifact::{ArtifactId, InvalidArtifactId};
pub use chat::{ChatEvent, RoleFlags};
pub use queue::{QueuePhase, QueueSnapshot};
pub use request::{InvalidVolume, SpeakRequest, Volume};
pub use voice::{UnknownVoice, Voice, VoiceOption, VoiceSelection, resolve_voice, voice_options};
