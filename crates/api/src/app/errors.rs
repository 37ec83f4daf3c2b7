use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

/// Consistent machine-readable error body for console/API errors.
///
/// The doc gate's denial format is fixed separately by compatibility
/// requirements; everything else uses this shape.
pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
