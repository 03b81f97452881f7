//! Live event-stream client.
//!
//! One logical subscription per application id: connects to the backend's SSE
//! endpoint, parses `application.snapshot` messages, and replaces the store's
//! snapshot wholesale. Transport drops are transient; the client reconnects
//! with `Last-Event-ID` after the server-tunable retry delay, and replayed
//! duplicates are dropped by event id. An explicit `stream.error` message is
//! terminal: it is recorded on the store and the subscription ends.

pub mod sse;

use std::time::Duration;

use futures::StreamExt;
use reqwest::header;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::StreamError;
use crate::models::JobApplicationSnapshot;
use crate::store::{SnapshotStore, StreamFault};
use crate::stream::sse::{SseEvent, SseParser};

/// Named event carrying a full [`JobApplicationSnapshot`] payload.
pub const EVENT_SNAPSHOT: &str = "application.snapshot";
/// Named event carrying a terminal `{message?}` payload.
pub const EVENT_STREAM_ERROR: &str = "stream.error";

/// Reconnect delay until the server sends a `retry:` hint.
const DEFAULT_RETRY: Duration = Duration::from_secs(3);

pub struct StreamClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    application_id: Uuid,
}

/// Why one connection attempt stopped producing events.
enum EndOfStream {
    /// Body ended or the transport failed mid-stream; reconnectable.
    Disconnected,
    /// Server sent `stream.error`; terminal.
    ServerError(String),
}

/// Per-subscription state carried across reconnects.
struct Session {
    /// Sticky stream position, sent back as `Last-Event-ID`.
    last_event_id: Option<String>,
    /// Transport id of the last processed snapshot, for replay dedup.
    last_processed_id: Option<String>,
    retry_after: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            last_event_id: None,
            last_processed_id: None,
            retry_after: DEFAULT_RETRY,
        }
    }
}

impl StreamClient {
    /// Refuses construction without a bearer token.
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        token: Option<&str>,
        application_id: Uuid,
    ) -> Result<Self, StreamError> {
        let token = match token {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => return Err(StreamError::MissingToken),
        };
        Ok(Self {
            http,
            base_url: base_url.into(),
            token,
            application_id,
        })
    }

    /// Runs the subscription until the server terminates it with
    /// `stream.error` or the future is dropped. Transport drops reconnect
    /// internally and are not surfaced as errors.
    pub async fn run(&self, store: &SnapshotStore) -> Result<(), StreamError> {
        let mut session = Session::default();
        loop {
            let outcome = self.consume_once(store, &mut session).await;
            store.set_connected(false);
            match outcome {
                Ok(EndOfStream::ServerError(message)) => {
                    warn!(%message, "stream terminated by server");
                    store.set_fault(StreamFault::Server(message.clone()));
                    return Err(StreamError::Server(message));
                }
                Ok(EndOfStream::Disconnected) => {
                    debug!(
                        retry_ms = session.retry_after.as_millis() as u64,
                        "stream disconnected, reconnecting"
                    );
                }
                Err(error) => {
                    warn!(%error, "stream transport error, reconnecting");
                }
            }
            tokio::time::sleep(session.retry_after).await;
        }
    }

    async fn consume_once(
        &self,
        store: &SnapshotStore,
        session: &mut Session,
    ) -> Result<EndOfStream, StreamError> {
        // Token travels in the URL path: the endpoint mirrors the browser
        // EventSource contract, which cannot set auth headers.
        let url = format!(
            "{}/api/v1/applications/{}/stream/{}",
            self.base_url, self.application_id, self.token
        );
        let mut request = self
            .http
            .get(&url)
            .header(header::ACCEPT, "text/event-stream");
        if let Some(id) = &session.last_event_id {
            request = request.header("Last-Event-ID", id.clone());
        }
        let response = request.send().await?.error_for_status()?;

        store.set_connected(true);
        store.clear_fault();
        info!(application_id = %self.application_id, "event stream connected");

        let mut parser = SseParser::new();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(error) => {
                    warn!(%error, "event stream read failed");
                    break;
                }
            };
            for event in parser.push(&chunk) {
                match event.event.as_deref() {
                    Some(EVENT_STREAM_ERROR) => {
                        return Ok(EndOfStream::ServerError(error_message(&event.data)));
                    }
                    Some(EVENT_SNAPSHOT) => self.apply_snapshot(store, session, event),
                    other => {
                        debug!(
                            event = other.unwrap_or("message"),
                            "ignoring unhandled stream event"
                        );
                    }
                }
            }
            if let Some(retry) = parser.retry_hint() {
                session.retry_after = retry;
            }
            if let Some(id) = parser.last_event_id() {
                session.last_event_id = Some(id.to_string());
            }
        }
        Ok(EndOfStream::Disconnected)
    }

    fn apply_snapshot(&self, store: &SnapshotStore, session: &mut Session, event: SseEvent) {
        if let Some(id) = &event.id {
            // Reconnect replay protection: the same transport id twice in a
            // row means the server re-sent a message we already handled.
            if session.last_processed_id.as_deref() == Some(id) {
                debug!(event_id = %id, "duplicate snapshot delivery dropped");
                return;
            }
            session.last_processed_id = Some(id.clone());
        }
        match serde_json::from_str::<JobApplicationSnapshot>(&event.data) {
            Ok(snapshot) => {
                debug!(
                    application_id = %snapshot.id,
                    status = ?snapshot.resume_generation_status,
                    events = snapshot.events.len(),
                    "snapshot applied"
                );
                store.update_snapshot(snapshot);
            }
            Err(error) => {
                warn!(%error, "snapshot payload failed to parse");
                store.set_fault(StreamFault::BadSnapshot(error.to_string()));
            }
        }
    }
}

fn error_message(data: &str) -> String {
    serde_json::from_str::<Value>(data)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| "stream terminated by server".to_string())
}
