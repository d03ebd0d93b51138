//! Settled signal from the playback surface.

use axum::Json;
use axum::extract::State;
use chatvox_core::ArtifactId;

use crate::dto::{SettledRequest, SettledResponse};
use crate::state::AppState;

/// Report that playback of an artifact ended (finished, failed or aborted).
///
/// Always 200. `accepted` is false for duplicates, stale ids and ids that
/// are not well-formed.
pub async fn settled(
    State(state): State<AppState>,
    Json(req): Json<SettledRequest>,
) -> Json<SettledResponse> {
    let accepted = req
        .artifact_id
        .parse::<ArtifactId>()
        .is_ok_and(|id| state.tts.report_settled(&id));
    Json(SettledResponse { accepted })
}
