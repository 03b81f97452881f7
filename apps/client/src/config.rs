use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Tailor backend, e.g. `https://api.tailor.dev`.
    pub api_url: String,
    /// Bearer token issued at login. Absent until the user authenticates;
    /// the stream client refuses to connect without one.
    pub api_token: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: require_env("TAILOR_API_URL")?,
            api_token: std::env::var("TAILOR_API_TOKEN").ok(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Returns a copy carrying the given bearer token, as obtained from
    /// [`crate::api::ApiClient::login`].
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
