//! Inbound chat messages.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chatvox_core::{ChatEvent, RoleFlags};

use crate::dto::{ChatMessageRequest, OutcomeResponse};
use crate::state::AppState;

/// Hand a chat message to the pipeline.
pub async fn message(
    State(state): State<AppState>,
    Json(req): Json<ChatMessageRequest>,
) -> (StatusCode, Json<OutcomeResponse>) {
    let roles = RoleFlags {
        moderator: req.moderator,
        vip: req.vip,
    };
    let event = ChatEvent::new(req.id, req.author, req.text, roles);
    let outcome = state.tts.on_chat_message(&event);
    (StatusCode::ACCEPTED, Json(OutcomeResponse { outcome }))
}
