//! API documentation endpoints.
//!
//! These sit on the doc gate's protected path set: internal tooling
//! reaches them only with the shared token.

use axum::Json;
use axum::response::Html;

/// GET /api/doc - human-readable endpoint index.
pub async fn doc_index() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html>
  <head><title>Vendora API</title></head>
  <body>
    <h1>Vendora API</h1>
    <ul>
      <li><code>POST /auth/login</code> - exchange credentials for a session token</li>
      <li><code>GET /auth/session</code> - inspect the current session</li>
      <li><code>GET /admin</code> - console index (registered resources)</li>
      <li><code>GET /health</code> - liveness probe</li>
    </ul>
    <p>Machine-readable variant: <code>/api/doc.json</code></p>
  </body>
</html>
"#,
    )
}

/// GET /api/doc.json - machine-readable endpoint index.
pub async fn doc_json() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "vendora-api",
        "paths": {
            "/auth/login": { "post": "exchange credentials for a session token" },
            "/auth/session": { "get": "inspect the current session" },
            "/admin": { "get": "console index (registered resources)" },
            "/health": { "get": "liveness probe" },
        },
    }))
}
