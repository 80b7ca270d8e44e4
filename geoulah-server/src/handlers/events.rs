//! Server-Sent Events handler for language and cache updates

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Event name and JSON payload sent for `event`
pub fn event_payload(event: &ServerEvent) -> (&'static str, String) {
    match event {
        ServerEvent::LanguageChanged { language, at } => (
            "language_changed",
            serde_json::json!({ "language": language, "at": at.to_rfc3339() }).to_string(),
        ),
        ServerEvent::CacheCleared { books, at } => (
            "cache_cleared",
            serde_json::json!({ "books": books, "at": at.to_rfc3339() }).to_string(),
        ),
    }
}

/// SSE endpoint for real-time updates
pub async fn server_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.subscribe());

    let event_stream = stream.filter_map(|result| match result {
        Ok(event) => {
            let (event_type, data) = event_payload(&event);
            Some(Ok(Event::default().event(event_type).data(data)))
        }
        // lagged receiver, skip
        Err(_) => None,
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_event_payload() {
        let (name, data) = event_payload(&ServerEvent::LanguageChanged {
            language: "fr".to_string(),
            at: chrono::Utc::now(),
        });
        assert_eq!(name, "language_changed");
        let json: Value = serde_json::from_str(&data).unwrap();
        assert_eq!(json["language"], "fr");
        assert!(json["at"].is_string());

        let (name, data) = event_payload(&ServerEvent::CacheCleared {
            books: 2,
            at: chrono::Utc::now(),
        });
        assert_eq!(name, "cache_cleared");
        let json: Value = serde_json::from_str(&data).unwrap();
        assert_eq!(json["books"], 2);
    }
}
