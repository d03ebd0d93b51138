//! SSE playback surface.
//!
//! Implements [`PlaybackSurfacePort`] on top of a broadcast channel. Every
//! connected browser receives every command; with nobody connected the
//! command is dropped, which the queue tolerates.

use std::convert::Infallible;
use std::sync::Arc;

use axum::response::sse::{Event, KeepAlive, Sse};
use chatvox_core::{PlaybackCommand, PlaybackSurfacePort};
use futures_util::stream::Stream;
use tokio::sync::broadcast;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

use crate::dto::PlaybackEventDto;

/// SSE broadcaster that implements the playback surface port.
#[derive(Debug, Clone)]
pub struct SseBroadcaster {
    sender: broadcast::Sender<PlaybackEventDto>,
}

impl SseBroadcaster {
    /// Create a broadcaster buffering up to `capacity` events.
    ///
    /// Slow clients may miss events if the buffer overflows.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a broadcaster with default capacity (64 events).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(64)
    }

    /// Raw receiver for in-process listeners.
    pub fn listen(&self) -> broadcast::Receiver<PlaybackEventDto> {
        self.sender.subscribe()
    }

    /// Create an SSE stream for a new client connection.
    ///
    /// Each command becomes one event named after its type with a JSON
    /// payload. Includes a keep-alive ping every 30 seconds.
    pub fn subscribe(
        self: Arc<Self>,
    ) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
        let receiver = self.sender.subscribe();
        let stream = BroadcastStream::new(receiver).filter_map(|result| match result {
            Ok(event) => match Event::default().event(event.event_name()).json_data(&event) {
                Ok(sse_event) => Some(Ok(sse_event)),
                Err(e) => {
                    tracing::warn!("Failed to serialize playback event: {}", e);
                    None
                }
            },
            Err(e) => {
                // Lagged receivers skip ahead
                tracing::debug!("SSE stream error: {}", e);
                None
            }
        });

        Sse::new(stream).keep_alive(
            KeepAlive::new()
                .interval(std::time::Duration::from_secs(30))
                .text("ping"),
        )
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl PlaybackSurfacePort for SseBroadcaster {
    fn send(&self, command: PlaybackCommand) {
        let event = PlaybackEventDto::from(command);
        tracing::debug!(
            event = event.event_name(),
            subscribers = self.subscriber_count(),
            "Playback event"
        );
        // No subscribers is fine
        let _ = self.sender.send(event);
    }
}
