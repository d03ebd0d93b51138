//! HTTP request handlers.

pub mod audio;
pub mod chat;
pub mod events;
pub mod playback;
pub mod queue;
pub mod settings;
pub mod speak;
pub mod voices;
