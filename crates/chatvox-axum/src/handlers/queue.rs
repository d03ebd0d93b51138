//! Queue status.

use axum::Json;
use axum::extract::State;
use chatvox_core::QueueSnapshot;

use crate::state::AppState;

pub async fn snapshot(State(state): State<AppState>) -> Json<QueueSnapshot> {
    Json(state.tts.snapshot())
}
