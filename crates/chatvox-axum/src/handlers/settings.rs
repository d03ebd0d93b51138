//! Settings handlers - speech configuration.

use axum::Json;
use axum::extract::State;
use chatvox_core::{TtsSettings, TtsSettingsUpdate};

use crate::error::HttpError;
use crate::state::AppState;

/// Get current speech settings.
pub async fn get(State(state): State<AppState>) -> Json<TtsSettings> {
    Json(state.tts.current_settings())
}

/// Partially update speech settings. Applies to the next chat message.
pub async fn update(
    State(state): State<AppState>,
    Json(req): Json<TtsSettingsUpdate>,
) -> Result<Json<TtsSettings>, HttpError> {
    Ok(Json(state.tts.settings().update(req).await?))
}
