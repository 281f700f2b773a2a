//! SSE (Server-Sent Events) framing for streamed completions.
//!
//! Converts a stream of [`StreamEvent`]s into SSE events compatible with the
//! OpenAI streaming format: one `data: <json>` event per chunk, then
//! `data: [DONE]`. Axum flushes each event as soon as it is yielded.

use std::sync::Arc;

use axum::response::sse::Event;
use futures::stream::Stream;
use tokio_stream::StreamExt;
use tracing::debug;

use crate::metrics::Metrics;
use crate::simulator::stream::StreamEvent;

/// Payload of the terminal SSE event.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Tracks one response stream and reports how it ended when dropped.
struct StreamGuard {
    request_id: String,
    metrics: Arc<Metrics>,
    sent: usize,
    finished: bool,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        if self.finished {
            debug!(request_id = %self.request_id, chunks = self.sent, "Stream complete");
        } else {
            self.metrics.record_stream_cancelled();
            debug!(
                request_id = %self.request_id,
                chunks = self.sent,
                "Client disconnected, stream abandoned"
            );
        }
    }
}

/// Convert simulator stream events into an SSE stream.
pub fn events_to_sse_stream<S>(
    events: S,
    request_id: String,
    metrics: Arc<Metrics>,
) -> impl Stream<Item = Result<Event, axum::Error>> + Send + 'static
where
    S: Stream<Item = StreamEvent> + Send + 'static,
{
    let mut guard = StreamGuard {
        request_id,
        metrics,
        sent: 0,
        finished: false,
    };

    events.map(move |event| match event {
        StreamEvent::Chunk(chunk) => {
            guard.sent += 1;
            guard.metrics.record_stream_chunk();
            Event::default().json_data(&chunk)
        }
        StreamEvent::Done => {
            guard.finished = true;
            Ok(Event::default().data(DONE_SENTINEL))
        }
    })
}
