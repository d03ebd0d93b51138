//! Artifact store: the registry behind the artifact delivery channel.
//!
//! An artifact is reachable through the store only while it is live: from
//! registration until the queue settles or preempts it. Removal deletes the
//! scratch file, so a settled id can never serve stale bytes.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chatvox_core::ArtifactId;
use tracing::debug;

use crate::error::TtsError;
use crate::scratch::remove_quietly;

/// MIME type of every artifact.
pub const ARTIFACT_CONTENT_TYPE: &str = "audio/mpeg";

/// A synthesized audio file on scratch storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub id: ArtifactId,
    pub path: PathBuf,
    pub size: u64,
}

impl Artifact {
    pub const fn content_type(&self) -> &'static str {
        ARTIFACT_CONTENT_TYPE
    }
}

/// Live artifacts keyed by id.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    live: Mutex<HashMap<ArtifactId, Artifact>>,
    discarded: AtomicU64,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ArtifactId, Artifact>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make an artifact reachable.
    pub fn register(&self, artifact: Artifact) {
        debug!(artifact_id = %artifact.id, size = artifact.size, "Artifact registered");
        self.lock().insert(artifact.id.clone(), artifact);
    }

    pub fn is_live(&self, id: &ArtifactId) -> bool {
        self.lock().contains_key(id)
    }

    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    /// Artifacts deleted without ever being delivered.
    pub fn discarded_count(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }

    /// Read the bytes of a live artifact.
    ///
    /// Unknown and already-removed ids are [`TtsError::ArtifactNotFound`],
    /// as is a live id whose file vanished underneath it.
    pub async fn read(&self, id: &ArtifactId) -> Result<Vec<u8>, TtsError> {
        let path = self
            .lock()
            .get(id)
            .map(|artifact| artifact.path.clone())
            .ok_or_else(|| TtsError::ArtifactNotFound(id.clone()))?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TtsError::ArtifactNotFound(id.clone()))
            }
            Err(e) => Err(TtsError::Io(e)),
        }
    }

    /// Unregister an artifact and delete its file.
    ///
    /// Returns `false` if the id was not live; nothing is touched then.
    pub fn remove(&self, id: &ArtifactId) -> bool {
        let Some(artifact) = self.lock().remove(id) else {
            return false;
        };
        remove_quietly(&artifact.path);
        debug!(artifact_id = %id, "Artifact removed");
        true
    }

    /// Delete an artifact that was never registered (preempted synthesis).
    pub fn discard(&self, artifact: &Artifact) {
        remove_quietly(&artifact.path);
        self.discarded.fetch_add(1, Ordering::Relaxed);
        debug!(artifact_id = %artifact.id, "Discarded preempted artifact");
    }

    /// Remove every live artifact. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let drained: Vec<Artifact> = self.lock().drain().map(|(_, artifact)| artifact).collect();
        for artifact in &drained {
            remove_quietly(&artifact.path);
        }
        drained.len()
    }
}
