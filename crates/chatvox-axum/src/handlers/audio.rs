//! Artifact delivery - serves live artifact bytes.
//!
//! `GET /audio/{name}` where `name` is `<id>` or `<id>.mp3`. Any query
//! string is ignored. Unknown, malformed and already-settled ids are 404.
//! Responses forbid caching so a reused URL can never replay old audio.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chatvox_core::ArtifactId;
use chatvox_tts::{ARTIFACT_CONTENT_TYPE, TtsError};

use crate::error::HttpError;
use crate::state::AppState;

const NO_CACHE: &str = "no-store, no-cache, must-revalidate, private";

/// Serve an artifact's bytes.
pub async fn get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, HttpError> {
    let stem = name.strip_suffix(".mp3").unwrap_or(&name);
    let Ok(id) = stem.parse::<ArtifactId>() else {
        tracing::warn!(name = %name, "Rejected malformed artifact name");
        return Err(HttpError::NotFound(format!("Artifact '{name}'")));
    };

    let bytes = match state.tts.open_artifact(&id).await {
        Ok(bytes) => bytes,
        Err(e @ TtsError::ArtifactNotFound(_)) => {
            tracing::warn!(artifact_id = %id, "Requested artifact is not live");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    Ok((
        [
            (header::CONTENT_TYPE, ARTIFACT_CONTENT_TYPE),
            (header::CACHE_CONTROL, NO_CACHE),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        bytes,
    )
        .into_response())
}
