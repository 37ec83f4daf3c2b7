//! Login and session inspection.

use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use chrono::{Duration, Utc};
use serde::Deserialize;

use vendora_auth::{Hs256TokenCodec, SessionClaims, verify_password};

use crate::app::errors::json_error;
use crate::config::AdminAccount;
use crate::context::SessionContext;

/// Shared state for the login endpoint.
pub struct LoginContext {
    pub accounts: Vec<AdminAccount>,
    pub codec: Arc<Hs256TokenCodec>,
    pub session_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/login - exchange credentials for a session token.
///
/// Unknown email and wrong password answer identically.
pub async fn login(
    Extension(ctx): Extension<Arc<LoginContext>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let Some(account) = ctx.accounts.iter().find(|a| a.email == body.email) else {
        return invalid_credentials();
    };

    if !verify_password(&account.password_hash, &body.password) {
        return invalid_credentials();
    }

    let now = Utc::now();
    let claims = SessionClaims {
        sub: account.subject,
        name: account.display_name.clone(),
        roles: account.roles.clone(),
        issued_at: now,
        expires_at: now + ctx.session_ttl,
    };

    let token = match ctx.codec.mint(&claims) {
        Ok(token) => token,
        Err(err) => {
            tracing::error!("failed to mint session token: {err}");
            return json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "authentication unavailable",
            );
        }
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "token": token,
            "subject": claims.sub.to_string(),
            "display_name": claims.name,
            "roles": claims.roles.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
            "expires_at": claims.expires_at,
        })),
    )
        .into_response()
}

fn invalid_credentials() -> axum::response::Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "invalid_credentials",
        "invalid email or password",
    )
}

/// GET /auth/session - echo the authenticated session.
///
/// Clients use this to validate a restored credential without touching
/// any resource.
pub async fn session(Extension(session): Extension<SessionContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "subject": session.subject().to_string(),
        "display_name": session.display_name(),
        "roles": session.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
    }))
}
