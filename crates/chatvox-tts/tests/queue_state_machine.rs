//! Integration tests for the `SingleFlightQueue` state machine.
//!
//! The queue is driven with a gated mock engine: every synthesis call blocks
//! until the test releases a permit, which lets a test hold a request in the
//! `Synthesizing` phase while it enqueues another. Outbound playback
//! commands are observed through a `ChannelPlaybackSurface`.
//!
//! # What is tested
//!
//! - Deliver → settle → idle, with the artifact deleted on settle
//! - Duplicate and foreign settle signals are no-ops
//! - Preemption while synthesizing: one abort, late artifact discarded
//! - Preemption while delivering: one abort, live artifact deleted at once
//! - One abort per enqueue that arrives while processing; newest wins
//! - Synthesis failure: one error report, no artifact, back to idle
//! - A preempted request that fails is dropped silently
//! - Volume travels with the request to the surface

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chatvox_core::{
    ArtifactId, ChannelPlaybackSurface, PlaybackCommand, QueuePhase, SequentialIdGenerator,
    SpeakRequest, Voice, Volume,
};
use chatvox_tts::{
    ArtifactStore, Prosody, SYNTHESIS_FAILED_MESSAGE, ScratchDir, SingleFlightQueue,
    SynthesisEngine, SynthesisWorker, TtsError,
};
use tempfile::TempDir;
use tokio::sync::Semaphore;
use tokio::sync::mpsc::UnboundedReceiver;

const WAIT: Duration = Duration::from_secs(2);

// ── Mock engine ────────────────────────────────────────────────────

/// Engine that records every call and blocks until released.
///
/// Audio is `ID3` followed by the request text, so a test can tell which
/// request an artifact belongs to. Text containing `fail` makes the call
/// fail instead.
struct GatedEngine {
    gate: Semaphore,
    calls: Mutex<Vec<String>>,
    finished: AtomicUsize,
}

impl GatedEngine {
    fn gated() -> Self {
        Self {
            gate: Semaphore::new(0),
            calls: Mutex::new(Vec::new()),
            finished: AtomicUsize::new(0),
        }
    }

    fn open() -> Self {
        Self {
            gate: Semaphore::new(Semaphore::MAX_PERMITS),
            calls: Mutex::new(Vec::new()),
            finished: AtomicUsize::new(0),
        }
    }

    fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Calls that have returned, successfully or not.
    fn finished_count(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisEngine for GatedEngine {
    async fn synthesize(
        &self,
        text: &str,
        _voice: Voice,
        _prosody: Prosody,
    ) -> Result<Vec<u8>, TtsError> {
        self.calls.lock().unwrap().push(text.to_string());
        self.gate.acquire().await.unwrap().forget();
        self.finished.fetch_add(1, Ordering::SeqCst);
        if text.contains("fail") {
            return Err(TtsError::Synthesis("engine exploded".to_string()));
        }
        Ok(format!("ID3{text}").into_bytes())
    }

    fn name(&self) -> &str {
        "gated"
    }
}

// ── Harness ────────────────────────────────────────────────────────

struct Harness {
    _dir: TempDir,
    scratch: ScratchDir,
    engine: Arc<GatedEngine>,
    store: Arc<ArtifactStore>,
    queue: SingleFlightQueue,
    commands: UnboundedReceiver<PlaybackCommand>,
}

impl Harness {
    fn new(engine: GatedEngine) -> Self {
        let dir = TempDir::new().unwrap();
        let scratch = ScratchDir::open(dir.path()).unwrap();
        let engine = Arc::new(engine);
        let store = Arc::new(ArtifactStore::new());
        let (surface, commands) = ChannelPlaybackSurface::new();
        let worker = SynthesisWorker::new(
            engine.clone(),
            Arc::new(SequentialIdGenerator::new()),
            scratch.clone(),
        );
        let queue = SingleFlightQueue::new(worker, store.clone(), Arc::new(surface));
        Self {
            _dir: dir,
            scratch,
            engine,
            store,
            queue,
            commands,
        }
    }

    async fn next_command(&mut self) -> PlaybackCommand {
        tokio::time::timeout(WAIT, self.commands.recv())
            .await
            .expect("timed out waiting for a playback command")
            .expect("surface channel closed")
    }

    fn assert_no_command(&mut self) {
        if let Ok(cmd) = self.commands.try_recv() {
            panic!("unexpected playback command: {cmd:?}");
        }
    }

    /// Wait for a delivery and return the artifact id with its bytes.
    async fn next_delivery(&mut self) -> (ArtifactId, Volume, Vec<u8>) {
        match self.next_command().await {
            PlaybackCommand::DeliverArtifact {
                artifact_id,
                volume,
            } => {
                let bytes = self.store.read(&artifact_id).await.unwrap();
                (artifact_id, volume, bytes)
            }
            other => panic!("expected delivery, got {other:?}"),
        }
    }

    fn scratch_files(&self) -> usize {
        std::fs::read_dir(self.scratch.path()).unwrap().count()
    }
}

fn request(text: &str) -> SpeakRequest {
    SpeakRequest::new(text, Voice::Svetlana, Volume::default()).unwrap()
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(WAIT, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_initial_state_is_idle() {
    let h = Harness::new(GatedEngine::open());
    let snapshot = h.queue.snapshot();
    assert_eq!(snapshot.phase, QueuePhase::Idle);
    assert!(!snapshot.has_pending);
    assert!(snapshot.live_artifact.is_none());
}

#[tokio::test]
async fn test_deliver_then_settle_returns_to_idle() {
    let mut h = Harness::new(GatedEngine::open());

    h.queue.enqueue(request("hello"));
    let (id, _, bytes) = h.next_delivery().await;
    assert_eq!(bytes, b"ID3hello");

    let snapshot = h.queue.snapshot();
    assert_eq!(snapshot.phase, QueuePhase::Delivering);
    assert_eq!(snapshot.live_artifact.as_ref(), Some(&id));

    assert!(h.queue.on_playback_settled(&id));
    assert_eq!(h.queue.snapshot().phase, QueuePhase::Idle);
    assert!(!h.store.is_live(&id));
    assert_eq!(h.scratch_files(), 0);
    h.assert_no_command();
}

#[tokio::test]
async fn test_duplicate_settle_is_noop() {
    let mut h = Harness::new(GatedEngine::open());

    h.queue.enqueue(request("once"));
    let (id, _, _) = h.next_delivery().await;

    assert!(h.queue.on_playback_settled(&id));
    let after_first = h.queue.snapshot();
    assert!(!h.queue.on_playback_settled(&id));
    assert_eq!(h.queue.snapshot(), after_first);
    assert_eq!(h.engine.call_count(), 1);
    h.assert_no_command();
}

#[tokio::test]
async fn test_settle_for_unknown_artifact_is_ignored() {
    let mut h = Harness::new(GatedEngine::open());

    h.queue.enqueue(request("keep playing"));
    let (id, _, _) = h.next_delivery().await;

    let stranger = ArtifactId::new("not_ours").unwrap();
    assert!(!h.queue.on_playback_settled(&stranger));
    assert_eq!(h.queue.snapshot().phase, QueuePhase::Delivering);
    assert!(h.store.is_live(&id));
}

#[tokio::test]
async fn test_preempt_while_synthesizing_discards_late_artifact() {
    let mut h = Harness::new(GatedEngine::gated());

    h.queue.enqueue(request("first"));
    wait_until(|| h.engine.call_count() == 1).await;
    assert_eq!(h.queue.snapshot().phase, QueuePhase::Synthesizing);

    h.queue.enqueue(request("second"));
    assert_eq!(h.next_command().await, PlaybackCommand::AbortPlayback);
    wait_until(|| h.engine.call_count() == 2).await;

    // First call finishes after it was preempted
    h.engine.release(1);
    wait_until(|| h.store.discarded_count() == 1).await;
    assert_eq!(h.scratch_files(), 0);
    assert_eq!(h.store.live_count(), 0);
    h.assert_no_command();
    assert_eq!(h.queue.snapshot().phase, QueuePhase::Synthesizing);

    h.engine.release(1);
    let (id, _, bytes) = h.next_delivery().await;
    assert_eq!(bytes, b"ID3second");
    assert!(h.queue.on_playback_settled(&id));
    assert_eq!(h.scratch_files(), 0);
}

#[tokio::test]
async fn test_preempt_while_delivering_deletes_live_artifact() {
    let mut h = Harness::new(GatedEngine::gated());

    h.engine.release(1);
    h.queue.enqueue(request("first"));
    let (first, _, _) = h.next_delivery().await;

    h.queue.enqueue(request("second"));
    assert_eq!(h.next_command().await, PlaybackCommand::AbortPlayback);
    assert!(!h.store.is_live(&first));
    assert!(matches!(
        h.store.read(&first).await,
        Err(TtsError::ArtifactNotFound(_))
    ));

    // The surface acknowledges the abort late; it must not disturb the new request
    assert!(!h.queue.on_playback_settled(&first));
    assert_eq!(h.queue.snapshot().phase, QueuePhase::Synthesizing);

    h.engine.release(1);
    let (second, _, bytes) = h.next_delivery().await;
    assert_ne!(first, second);
    assert_eq!(bytes, b"ID3second");
}

#[tokio::test]
async fn test_one_abort_per_enqueue_while_processing() {
    let mut h = Harness::new(GatedEngine::gated());

    h.queue.enqueue(request("r1"));
    h.queue.enqueue(request("r2"));
    h.queue.enqueue(request("r3"));
    h.queue.enqueue(request("r4"));

    for _ in 0..3 {
        assert_eq!(h.next_command().await, PlaybackCommand::AbortPlayback);
    }
    assert!(!h.queue.snapshot().has_pending);

    wait_until(|| h.engine.call_count() == 4).await;
    h.engine.release(4);

    let (_, _, bytes) = h.next_delivery().await;
    assert_eq!(bytes, b"ID3r4");
    wait_until(|| h.store.discarded_count() == 3).await;
    assert_eq!(h.store.live_count(), 1);
    assert_eq!(h.scratch_files(), 1);
    h.assert_no_command();
}

#[tokio::test]
async fn test_synthesis_failure_reports_and_goes_idle() {
    let mut h = Harness::new(GatedEngine::open());

    h.queue.enqueue(request("please fail"));
    match h.next_command().await {
        PlaybackCommand::ReportError { message, details } => {
            assert_eq!(message, SYNTHESIS_FAILED_MESSAGE);
            assert!(details.contains("engine exploded"));
        }
        other => panic!("expected error report, got {other:?}"),
    }

    assert_eq!(h.queue.snapshot().phase, QueuePhase::Idle);
    assert_eq!(h.store.live_count(), 0);
    assert_eq!(h.scratch_files(), 0);
    h.assert_no_command();

    // The queue keeps working after a failure
    h.queue.enqueue(request("recovered"));
    let (_, _, bytes) = h.next_delivery().await;
    assert_eq!(bytes, b"ID3recovered");
}

#[tokio::test]
async fn test_preempted_failure_is_not_reported() {
    let mut h = Harness::new(GatedEngine::gated());

    h.queue.enqueue(request("doomed fail"));
    wait_until(|| h.engine.call_count() == 1).await;

    h.queue.enqueue(request("survivor"));
    assert_eq!(h.next_command().await, PlaybackCommand::AbortPlayback);
    wait_until(|| h.engine.call_count() == 2).await;

    // The preempted call fails after the newer request took over
    h.engine.release(1);
    wait_until(|| h.engine.finished_count() == 1).await;
    tokio::task::yield_now().await;
    h.assert_no_command();
    assert_eq!(h.queue.snapshot().phase, QueuePhase::Synthesizing);
    assert_eq!(h.store.discarded_count(), 0);

    h.engine.release(1);
    let (id, _, bytes) = h.next_delivery().await;
    assert_eq!(bytes, b"ID3survivor");
    assert!(h.queue.on_playback_settled(&id));
    h.assert_no_command();
}

#[tokio::test]
async fn test_volume_travels_to_surface() {
    let mut h = Harness::new(GatedEngine::open());

    let loud = SpeakRequest::new("loud", Voice::Dmitry, Volume::new(90).unwrap()).unwrap();
    h.queue.enqueue(loud);
    let (_, volume, _) = h.next_delivery().await;
    assert_eq!(volume.get(), 90);
}

#[tokio::test]
async fn test_clear_drops_live_artifact() {
    let mut h = Harness::new(GatedEngine::open());

    h.queue.enqueue(request("bye"));
    let (id, _, _) = h.next_delivery().await;

    h.queue.clear();
    assert_eq!(h.next_command().await, PlaybackCommand::AbortPlayback);
    assert!(!h.store.is_live(&id));
    assert_eq!(h.queue.snapshot().phase, QueuePhase::Idle);
    assert!(!h.queue.on_playback_settled(&id));
}

#[tokio::test]
async fn test_advance_on_idle_queue_is_noop() {
    let mut h = Harness::new(GatedEngine::open());
    h.queue.advance();
    tokio::task::yield_now().await;
    assert_eq!(h.engine.call_count(), 0);
    h.assert_no_command();
}
