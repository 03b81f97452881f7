use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the REST client.
///
/// Non-2xx responses become [`ApiError::Api`] with the parsed error body when
/// the backend sent its `{"error": {"code", "message"}}` envelope. There is no
/// automatic retry at this layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status} {status_text}): {message}")]
    Api {
        status: u16,
        status_text: String,
        message: String,
        /// Parsed response body, when the backend sent JSON.
        body: Option<Value>,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced by the event-stream client.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Explicit `stream.error` message from the server; terminal for the
    /// connection, no client-initiated retry.
    #[error("stream error from server: {0}")]
    Server(String),

    #[error("missing bearer token")]
    MissingToken,
}
