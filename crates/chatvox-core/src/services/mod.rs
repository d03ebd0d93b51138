//! Application services built on top of the ports.

mod settings_service;

pub use settings_service::SettingsService;
