//! Serve command handler.

use std::time::Duration;

use anyhow::Result;
use chatvox_axum::{CorsConfig, ServerConfig, start_server};
use chatvox_core::paths::default_settings_path;
use chatvox_tts::CommandEngineConfig;
use chatvox_tts::backend::command::default_args;
use tokio_util::sync::CancellationToken;

use crate::commands::ServeArgs;

/// Translate CLI arguments into a server configuration.
pub fn server_config(args: ServeArgs) -> ServerConfig {
    let defaults = ServerConfig::with_defaults();
    let tts_args = if args.tts_args.is_empty() {
        default_args()
    } else {
        args.tts_args
    };
    let cors = if args.allowed_origins.is_empty() {
        CorsConfig::AllowAll
    } else {
        CorsConfig::AllowOrigins(args.allowed_origins)
    };

    ServerConfig {
        host: args.host,
        port: args.port,
        scratch_dir: args.scratch_dir.unwrap_or(defaults.scratch_dir),
        engine: CommandEngineConfig {
            program: args.tts_command,
            args: tts_args,
        },
        synthesis_timeout: args.synthesis_timeout_secs.map(Duration::from_secs),
        settings_path: Some(args.settings_file.unwrap_or_else(default_settings_path)),
        cors,
    }
}

/// Run the server until `cancel` fires.
pub async fn execute(args: ServeArgs, cancel: CancellationToken) -> Result<()> {
    let config = server_config(args);

    println!();
    println!("  chatvox server starting...");
    println!();
    println!("  Local:    http://{}:{}", config.host, config.port);
    println!("  Events:   http://{}:{}/api/events", config.host, config.port);
    println!("  Scratch:  {}", config.scratch_dir.display());
    println!("  Engine:   {}", config.engine.program);
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    start_server(config, cancel).await
}
