//! Route definitions and router construction.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::dto::AUDIO_ROUTE_PREFIX;
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// API routes without the `/api` prefix (nested by the caller).
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(handlers::events::stream))
        .route("/playback/settled", post(handlers::playback::settled))
        .route("/chat", post(handlers::chat::message))
        .route("/speak", post(handlers::speak::speak))
        .route("/queue", get(handlers::queue::snapshot))
        .route(
            "/settings",
            get(handlers::settings::get).put(handlers::settings::update),
        )
        .route("/voices", get(handlers::voices::list))
}

/// Create the full router: health, artifact bytes and the `/api` tree.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    let audio = Router::new()
        .route("/{name}", get(handlers::audio::get))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health_check))
        .nest(AUDIO_ROUTE_PREFIX, audio)
        .nest("/api", api_routes().with_state(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub(crate) async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
