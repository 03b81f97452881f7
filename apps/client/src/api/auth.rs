//! Auth endpoints: credential login and the Google OAuth code exchange.
//!
//! Both return the same [`AuthSession`] shape; its backend-issued token is
//! what every subsequent API call and stream subscription carries.

use reqwest::Method;
use serde::Serialize;

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::AuthSession;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct GoogleExchangeRequest<'a> {
    code: &'a str,
}

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let builder = self
            .request(Method::POST, "/api/v1/auth/login")
            .json(&LoginRequest { email, password });
        self.send(builder).await
    }

    /// Exchanges the authorization code from the Google OAuth redirect for a
    /// backend session.
    pub async fn exchange_google_code(&self, code: &str) -> Result<AuthSession, ApiError> {
        let builder = self
            .request(Method::POST, "/api/v1/auth/google")
            .json(&GoogleExchangeRequest { code });
        self.send(builder).await
    }
}
