//! HTTP application wiring (axum router + middleware stack).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per surface)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get, routing::post};

use vendora_auth::Hs256TokenCodec;

use crate::config::ApiConfig;
use crate::gate::{self, GateState};
use crate::middleware::{self, AuthState};
use crate::registry::{AdminRegistry, MenuEntry};

pub mod errors;
pub mod routes;

/// Build the full HTTP router from validated configuration and a
/// populated resource registry (public entrypoint used by `main.rs`).
pub fn build_app(config: ApiConfig, registry: AdminRegistry) -> Router {
    let codec = Arc::new(Hs256TokenCodec::new(config.session_secret.as_bytes()));

    let auth_state = AuthState {
        verifier: codec.clone(),
    };
    let gate_state = GateState {
        config: Arc::new(config.gate.clone()),
        verifier: codec.clone(),
    };

    let menu: Arc<Vec<MenuEntry>> = Arc::new(registry.menu().cloned().collect());
    let login = Arc::new(routes::auth::LoginContext {
        accounts: config.accounts.clone(),
        codec,
        session_ttl: config.session_ttl,
    });

    // Console subtree: the platform session check wraps everything below
    // the admin root, including every registered resource controller.
    let admin = Router::new()
        .route("/", get(routes::admin::index))
        .merge(registry.into_router())
        .layer(Extension(menu))
        .layer(axum::middleware::from_fn_with_state(
            auth_state.clone(),
            middleware::auth_middleware,
        ));

    let session = Router::new()
        .route("/auth/session", get(routes::auth::session))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/api/doc", get(routes::docs::doc_index))
        .route("/api/doc.json", get(routes::docs::doc_json))
        .route("/auth/login", post(routes::auth::login))
        .merge(session)
        .nest("/admin", admin)
        .layer(Extension(login))
        // The doc gate is the outermost layer: it sees every request
        // before any of the routing above and cannot be bypassed by it.
        .layer(axum::middleware::from_fn_with_state(
            gate_state,
            gate::access_gate,
        ))
}
