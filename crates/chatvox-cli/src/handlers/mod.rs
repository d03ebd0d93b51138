//! Command handlers.

pub mod config;
pub mod normalize;
pub mod serve;
pub mod voices;
