#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod backend;
pub mod error;
pub mod intake;
pub mod queue;
pub mod scratch;
pub mod service;
pub mod store;
pub mod worker;

// Re-export key types for convenience
pub use backend::{CommandEngine, CommandEngineConfig, Prosody, SynthesisEngine};
pub use error::TtsError;
pub use intake::{IntakeDecision, IntakeOutcome};
pub use queue::{SYNTHESIS_FAILED_MESSAGE, SingleFlightQueue};
pub use scratch::ScratchDir;
pub use service::{PipelineConfig, TtsService};
pub use store::{ARTIFACT_CONTENT_TYPE, Artifact, ArtifactStore};
pub use worker::SynthesisWorker;
