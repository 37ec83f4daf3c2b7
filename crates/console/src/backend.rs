//! Authentication backend seam.
//!
//! The session authority talks to the platform only through
//! [`AuthBackend`]; tests substitute fixtures.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use vendora_auth::{Credential, Identity, Role};
use vendora_core::SubjectId;

/// User-supplied login credentials.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend understood the request and rejected the credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The backend could not be reached or answered unexpectedly.
    #[error("authentication service error: {0}")]
    Service(String),
}

/// Exchange credentials for an identity with the platform's
/// authentication endpoint.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<Identity, BackendError>;
}

/// HTTP implementation talking to `POST /auth/login`.
pub struct HttpAuthBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    subject: SubjectId,
    display_name: String,
    roles: Vec<Role>,
    expires_at: DateTime<Utc>,
}

impl HttpAuthBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<Identity, BackendError> {
        let res = self
            .client
            .post(format!("{}/auth/login", self.base_url))
            .json(&serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await
            .map_err(|e| BackendError::Service(e.to_string()))?;

        match res.status() {
            reqwest::StatusCode::OK => {}
            reqwest::StatusCode::UNAUTHORIZED => return Err(BackendError::InvalidCredentials),
            status => return Err(BackendError::Service(format!("unexpected status {status}"))),
        }

        let body: LoginResponse = res
            .json()
            .await
            .map_err(|e| BackendError::Service(e.to_string()))?;

        Ok(Identity {
            subject: body.subject,
            display_name: body.display_name,
            roles: body.roles,
            credential: Credential::new(body.token),
            expires_at: Some(body.expires_at),
        })
    }
}
