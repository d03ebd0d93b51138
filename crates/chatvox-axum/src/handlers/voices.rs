//! Voice picker options.

use axum::Json;
use chatvox_core::{VoiceOption, voice_options};

pub async fn list() -> Json<Vec<VoiceOption>> {
    Json(voice_options())
}
