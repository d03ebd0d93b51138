//! Direct speech, bypassing prefix and permission checks.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chatvox_core::Volume;

use crate::dto::{OutcomeResponse, SpeakTextRequest};
use crate::error::HttpError;
use crate::state::AppState;

/// Speak arbitrary text with optional voice and volume overrides.
pub async fn speak(
    State(state): State<AppState>,
    Json(req): Json<SpeakTextRequest>,
) -> Result<(StatusCode, Json<OutcomeResponse>), HttpError> {
    let volume = req
        .volume
        .map(Volume::new)
        .transpose()
        .map_err(|e| HttpError::BadRequest(e.to_string()))?;

    let outcome = state.tts.speak(&req.text, req.voice, volume);
    Ok((StatusCode::ACCEPTED, Json(OutcomeResponse { outcome })))
}
