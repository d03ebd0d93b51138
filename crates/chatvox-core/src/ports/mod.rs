//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.

pub mod ids;
pub mod playback;
pub mod settings_repository;

use thiserror::Error;

pub use ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use playback::{ChannelPlaybackSurface, NoopPlaybackSurface, PlaybackSurfacePort};
pub use settings_repository::SettingsRepository;

/// Domain-specific errors for repository operations.
///
/// Abstracts away storage details (filesystem, serialization format) so
/// services only deal with failure categories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Storage backend error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (HTTP status codes, CLI exit
/// codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),
}
