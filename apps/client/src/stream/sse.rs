//! Incremental `text/event-stream` parser.
//!
//! Frames arrive as arbitrary byte chunks from the HTTP body; the parser
//! reassembles lines across chunk boundaries and dispatches one [`SseEvent`]
//! per blank line, per the WHATWG EventSource framing rules: `event:`,
//! `data:`, `id:` and `retry:` fields, `:`-prefixed comment lines, multi-line
//! data joined with `\n`, and CRLF tolerance. The last seen event id is
//! sticky across events, which is what makes reconnect replay detectable.

use std::time::Duration;

/// One dispatched server-sent event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseEvent {
    /// The sticky last-event-id at dispatch time.
    pub id: Option<String>,
    /// Named event type (`event:` field), if any.
    pub event: Option<String>,
    /// Data lines joined with `\n`.
    pub data: String,
}

#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
    event_type: Option<String>,
    data_lines: Vec<String>,
    last_event_id: Option<String>,
    retry_hint: Option<Duration>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk of body bytes; returns every event completed by it.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.strip_suffix('\n').unwrap_or(&line);
            let line = line.strip_suffix('\r').unwrap_or(line);
            if let Some(event) = self.process_line(line) {
                events.push(event);
            }
        }
        events
    }

    /// Reconnection delay requested by the server via `retry:`, if any.
    pub fn retry_hint(&self) -> Option<Duration> {
        self.retry_hint
    }

    /// The last event id seen on the stream, for the `Last-Event-ID`
    /// reconnect header.
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_event_id.as_deref()
    }

    fn process_line(&mut self, line: &str) -> Option<SseEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None; // comment / keep-alive
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event_type = Some(value.to_string()),
            "data" => self.data_lines.push(value.to_string()),
            // A NUL in the id invalidates it, per the framing rules.
            "id" if !value.contains('\0') => self.last_event_id = Some(value.to_string()),
            "retry" => {
                if let Ok(millis) = value.parse::<u64>() {
                    self.retry_hint = Some(Duration::from_millis(millis));
                }
            }
            _ => {} // unknown fields are ignored
        }
        None
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        if self.data_lines.is_empty() {
            // No data buffered: reset the event type and dispatch nothing.
            self.event_type = None;
            return None;
        }
        Some(SseEvent {
            id: self.last_event_id.clone(),
            event: self.event_type.take(),
            data: std::mem::take(&mut self.data_lines).join("\n"),
        })
    }
}
