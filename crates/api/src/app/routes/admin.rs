//! Admin console index: renders the registered resource menu.

use std::sync::Arc;

use axum::{Json, extract::Extension};

use crate::context::SessionContext;
use crate::registry::MenuEntry;

/// GET /admin - the console landing payload: who is signed in and which
/// resources the console exposes, in registration order.
pub async fn index(
    Extension(menu): Extension<Arc<Vec<MenuEntry>>>,
    Extension(session): Extension<SessionContext>,
) -> Json<serde_json::Value> {
    let items: Vec<serde_json::Value> = menu
        .iter()
        .map(|entry| {
            serde_json::json!({
                "entity": entry.entity,
                "label": entry.label,
                "icon": entry.icon,
                "href": format!("/admin/{}", entry.entity),
            })
        })
        .collect();

    Json(serde_json::json!({
        "display_name": session.display_name(),
        "menu": items,
    }))
}
