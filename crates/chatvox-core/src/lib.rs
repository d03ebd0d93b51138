#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod filter;
pub mod normalize;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;
pub mod storage;

// Re-export commonly used types for convenience
pub use domain::{
    ArtifactId, ChatEvent, InvalidArtifactId, InvalidVolume, QueuePhase, QueueSnapshot,
    RoleFlags, SpeakRequest, UnknownVoice, Voice, VoiceOption, VoiceSelection, Volume,
    resolve_voice, voice_options,
};
pub use events::PlaybackCommand;
pub use filter::{PermissionPolicy, is_allowed};
pub use normalize::normalize;
pub use ports::{
    ChannelPlaybackSurface, CoreError, IdGenerator, NoopPlaybackSurface, PlaybackSurfacePort,
    RepositoryError, SequentialIdGenerator, SettingsRepository, UuidIdGenerator,
};
pub use services::SettingsService;
pub use settings::{
    DEFAULT_TRIGGER_PREFIX, SettingsError, TtsSettings, TtsSettingsUpdate, validate_settings,
};
pub use storage::{InMemorySettingsRepository, JsonFileSettingsRepository};
