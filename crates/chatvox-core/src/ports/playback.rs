//! Playback surface port.
//!
//! The playback surface is whatever actually plays audio for the operator:
//! a browser tab listening on an event stream, a test recorder, or nothing
//! at all. The queue talks to it only through [`PlaybackSurfacePort`].

use tokio::sync::mpsc;

use crate::events::PlaybackCommand;

/// Sink for playback commands.
///
/// # Contract
///
/// - `send` never blocks and never fails from the caller's point of view.
///   A surface with nobody listening drops the command.
/// - For every `DeliverArtifact` it receives, the surface eventually reports
///   exactly one settled signal with the same artifact id back to the
///   service, including after an `AbortPlayback`.
pub trait PlaybackSurfacePort: Send + Sync {
    fn send(&self, command: PlaybackCommand);
}

/// Discards every command. For CLI contexts and tests that do not care.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPlaybackSurface;

impl PlaybackSurfacePort for NoopPlaybackSurface {
    fn send(&self, _command: PlaybackCommand) {}
}

/// Forwards commands into an unbounded channel.
///
/// Useful for in-process surfaces and for asserting on the exact command
/// sequence in tests.
#[derive(Debug, Clone)]
pub struct ChannelPlaybackSurface {
    tx: mpsc::UnboundedSender<PlaybackCommand>,
}

impl ChannelPlaybackSurface {
    /// Create a surface and the receiver that observes its commands.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PlaybackCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl PlaybackSurfacePort for ChannelPlaybackSurface {
    fn send(&self, command: PlaybackCommand) {
        // Receiver gone means nobody is listening
        let _ = self.tx.send(command);
    }
}
