//! REST API client — the single point of entry for all Tailor backend calls.
//!
//! ARCHITECTURAL RULE: no other module builds backend requests directly. All
//! REST traffic goes through [`ApiClient`] so auth and error handling stay in
//! one place. (The event stream is separate; see [`crate::stream`].)
//!
//! There is no retry at this layer; callers decide whether a failed
//! request is worth repeating.

pub mod applications;
pub mod auth;
pub mod documents;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::errors::ApiError;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Typed client for the Tailor backend. Cheap to clone; all clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");
        Self::with_http(http, base_url)
    }

    /// Uses an existing `reqwest::Client`, e.g. to share a pool with the
    /// stream client.
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut client = Self::new(config.api_url.clone());
        client.token = config.api_token.clone();
        client
    }

    /// Returns a copy authenticated with the given bearer token, as issued
    /// by [`login`](Self::login) or the OAuth exchange.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Sends the request and decodes a JSON body, mapping non-2xx responses
    /// to [`ApiError::Api`].
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ApiError::Parse)
    }

    /// Sends the request and discards any body, for endpoints like DELETE
    /// that return nothing useful.
    pub(crate) async fn send_no_content(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }
        debug!(%status, "request succeeded");
        Ok(())
    }
}

/// Builds [`ApiError::Api`] out of a non-2xx response, pulling the message
/// from the backend's `{"error": {"code", "message"}}` envelope when present.
async fn error_from_response(status: StatusCode, response: reqwest::Response) -> ApiError {
    let text = response.text().await.unwrap_or_default();
    let body: Option<Value> = serde_json::from_str(&text).ok();
    let message = body
        .as_ref()
        .and_then(|value| value.pointer("/error/message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or(text);
    let status_text = status.canonical_reason().unwrap_or("unknown").to_string();
    let message = if message.is_empty() {
        status_text.clone()
    } else {
        message
    };
    ApiError::Api {
        status: status.as_u16(),
        status_text,
        message,
        body,
    }
}
