//! Server-Sent Events (SSE) stream of layout events.

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;

use crate::state::AppState;

/// `GET /api/events/stream`
///
/// Each domain event is sent as one JSON `data:` frame. The stream ends when
/// the client disconnects or the bus is dropped.
pub async fn stream(
    State(state): State<AppState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let rx = state.event_bus.subscribe();
    let events = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => match serde_json::to_string(&event) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize event for SSE stream");
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "SSE subscriber lagged, some events were dropped");
            None
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
