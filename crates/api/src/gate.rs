//! Request access listener: shared-secret gate for sensitive
//! pre-authentication paths (API documentation).
//!
//! The decision core is a pure function of the request context and static
//! configuration. The axum wrapper is layered outermost on the router, so
//! no route wiring can bypass it.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use subtle::ConstantTimeEq;

use vendora_auth::{SessionClaims, TokenVerifier};

use crate::config::GateConfig;

/// Explicit request context consumed by [`evaluate`], so the decision is
/// testable without a live HTTP stack.
#[derive(Debug, Clone, Copy)]
pub struct GateRequest<'a> {
    pub path: &'a str,
    /// Raw query string, without the leading `?`.
    pub query: Option<&'a str>,
    /// `Authorization` header value, consulted only by rules that require
    /// a role.
    pub authorization: Option<&'a str>,
}

/// Outcome of the gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// No rule matched, or the supplied token satisfied the matching rule.
    Pass,
    /// A rule matched and the request did not satisfy it.
    Deny,
}

/// Decide whether a request may proceed.
///
/// First matching rule wins; unmatched paths pass untouched. A missing
/// token and a mismatched token are deliberately indistinguishable.
pub fn evaluate(
    config: &GateConfig,
    verifier: &dyn TokenVerifier,
    now: DateTime<Utc>,
    request: &GateRequest<'_>,
) -> GateOutcome {
    let Some(rule) = config.rules().iter().find(|r| r.path == request.path) else {
        return GateOutcome::Pass;
    };

    let Some(token) = token_param(request.query) else {
        return GateOutcome::Deny;
    };

    if !secrets_match(config.secret(), &token) {
        return GateOutcome::Deny;
    }

    if let Some(required) = &rule.required_role {
        return match bearer_claims(verifier, now, request.authorization) {
            Some(claims) if claims.roles.contains(required) => GateOutcome::Pass,
            _ => GateOutcome::Deny,
        };
    }

    GateOutcome::Pass
}

/// Constant-time comparison: a timing oracle on the secret is a
/// correctness bug, not a performance concern.
fn secrets_match(secret: &str, supplied: &str) -> bool {
    secret.as_bytes().ct_eq(supplied.as_bytes()).into()
}

/// Extract the `token` query parameter, the single supported transport.
fn token_param(query: Option<&str>) -> Option<String> {
    for pair in query?.split('&') {
        let mut parts = pair.splitn(2, '=');
        if parts.next() == Some("token") {
            let raw = parts.next().unwrap_or("");
            return Some(
                urlencoding::decode(raw)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| raw.to_string()),
            );
        }
    }
    None
}

fn bearer_claims(
    verifier: &dyn TokenVerifier,
    now: DateTime<Utc>,
    authorization: Option<&str>,
) -> Option<SessionClaims> {
    let token = authorization?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    verifier.verify(token, now).ok()
}

/// Shared state for the gate middleware.
#[derive(Clone)]
pub struct GateState {
    pub config: Arc<GateConfig>,
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Pipeline hook: runs on every request, before any route-specific
/// handling, and short-circuits with the denial response on a mismatch.
pub async fn access_gate(
    State(state): State<GateState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let outcome = {
        let request = GateRequest {
            path: req.uri().path(),
            query: req.uri().query(),
            authorization: req
                .headers()
                .get(axum::http::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok()),
        };
        evaluate(&state.config, state.verifier.as_ref(), Utc::now(), &request)
    };

    match outcome {
        GateOutcome::Pass => next.run(req).await,
        GateOutcome::Deny => {
            // The path is loggable; the supplied token is not.
            tracing::warn!(path = %req.uri().path(), "denied access to protected path");
            denial_response()
        }
    }
}

/// The exact denial wire format: 403 with `{"success": false, "error": ...}`.
///
/// The message stays generic on purpose: callers must not learn whether
/// the token was missing, malformed, or merely wrong.
pub fn denial_response() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(serde_json::json!({
            "success": false,
            "error": "access denied",
        })),
    )
        .into_response()
}
