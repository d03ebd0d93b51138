//! SSE events handler - playback command stream.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use futures_util::stream::Stream;

use crate::state::AppState;

/// SSE stream of playback commands.
///
/// Event names: `deliver_artifact`, `abort_playback`, `report_error`.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    tracing::debug!("Playback surface connected");
    state.sse.clone().subscribe()
}
