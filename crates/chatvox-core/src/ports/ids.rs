//! Artifact id generation.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ArtifactId;

/// Source of fresh, unique artifact ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> ArtifactId;
}

/// Random v4 UUIDs in simple (hyphen-free) form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> ArtifactId {
        ArtifactId::from_generated(uuid::Uuid::new_v4().simple().to_string())
    }
}

/// Predictable ids (`tts_1`, `tts_2`, ...). For tests.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> ArtifactId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        ArtifactId::from_generated(format!("tts_{n}"))
    }
}
