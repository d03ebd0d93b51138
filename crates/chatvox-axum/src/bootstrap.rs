//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter. All concrete implementations are instantiated here.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chatvox_core::paths::default_scratch_dir;
use chatvox_core::{
    InMemorySettingsRepository, JsonFileSettingsRepository, PlaybackSurfacePort,
    SettingsRepository, SettingsService, UuidIdGenerator,
};
use chatvox_tts::{CommandEngine, CommandEngineConfig, PipelineConfig, SynthesisEngine, TtsService};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::sse::SseBroadcaster;

/// Default port, matching the audio server browser surfaces expect.
pub const DEFAULT_PORT: u16 = 3778;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Where synthesized artifacts are written.
    pub scratch_dir: PathBuf,
    /// External synthesis command.
    pub engine: CommandEngineConfig,
    /// Watchdog for a single synthesis call.
    pub synthesis_timeout: Option<Duration>,
    /// Settings file. `None` keeps settings in memory only.
    pub settings_path: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Create config with default paths.
    pub fn with_defaults() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            scratch_dir: default_scratch_dir(),
            engine: CommandEngineConfig::default(),
            synthesis_timeout: None,
            settings_path: None,
            cors: CorsConfig::default(),
        }
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// The speech pipeline.
    pub tts: Arc<TtsService>,
    /// SSE broadcaster acting as the playback surface.
    pub sse: Arc<SseBroadcaster>,
}

/// Bootstrap with the configured external-command engine.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let engine = Arc::new(CommandEngine::new(config.engine.clone()));
    bootstrap_with_engine(config, engine).await
}

/// Bootstrap with an explicit synthesis engine.
pub async fn bootstrap_with_engine(
    config: &ServerConfig,
    engine: Arc<dyn SynthesisEngine>,
) -> Result<AxumContext> {
    info!(
        target: "chatvox.paths",
        scratch_dir = %config.scratch_dir.display(),
        settings_path = ?config.settings_path,
        engine = engine.name(),
        "Axum bootstrap resolved paths"
    );

    // 1. Settings
    let repo: Arc<dyn SettingsRepository> = match &config.settings_path {
        Some(path) => Arc::new(JsonFileSettingsRepository::new(path)),
        None => Arc::new(InMemorySettingsRepository::default()),
    };
    let settings = Arc::new(SettingsService::load(repo).await?);

    // 2. Playback surface
    let sse = Arc::new(SseBroadcaster::with_defaults());

    // 3. Pipeline
    let pipeline = PipelineConfig {
        scratch_dir: config.scratch_dir.clone(),
        synthesis_timeout: config.synthesis_timeout,
    };
    let tts = Arc::new(TtsService::new(
        &pipeline,
        settings,
        engine,
        Arc::new(UuidIdGenerator),
        sse.clone() as Arc<dyn PlaybackSurfacePort>,
    )?);

    Ok(AxumContext { tts, sse })
}

/// Serve on an already-bound listener until `cancel` fires.
///
/// Clears the queue and sweeps the scratch directory on the way out.
pub async fn serve(
    listener: TcpListener,
    config: &ServerConfig,
    cancel: CancellationToken,
) -> Result<()> {
    let addr = listener.local_addr()?;
    let ctx = bootstrap(config).await?;
    let tts = Arc::clone(&ctx.tts);

    let app = crate::routes::create_router(ctx, &config.cors);
    info!("chatvox listening on http://{addr}");
    info!("Point the playback page at http://{addr}/api/events");

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await;

    tts.shutdown();
    info!("chatvox server shut down");
    result.map_err(Into::into)
}

/// Bind the configured address and serve until `cancel` fires.
pub async fn start_server(config: ServerConfig, cancel: CancellationToken) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    serve(listener, &config, cancel).await
}
