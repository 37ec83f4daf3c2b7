//! Built-in catalog resource: a minimal in-memory product controller so
//! the console has something real to protect. Business depth is out of
//! scope here on purpose.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::errors::json_error;
use crate::registry::AdminController;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
}

type Store = Arc<RwLock<HashMap<Uuid, Product>>>;

/// Admin controller for the product catalog.
#[derive(Clone, Default)]
pub struct CatalogController {
    products: Store,
}

impl AdminController for CatalogController {
    fn router(&self) -> Router {
        Router::new()
            .route("/", get(list).post(create))
            .route("/:id", get(fetch).delete(remove))
            .layer(Extension(self.products.clone()))
    }
}

#[derive(Debug, Deserialize)]
struct CreateProduct {
    sku: String,
    name: String,
}

async fn list(Extension(store): Extension<Store>) -> Json<Vec<Product>> {
    let mut all: Vec<Product> = store.read().unwrap().values().cloned().collect();
    all.sort_by(|a, b| a.sku.cmp(&b.sku));
    Json(all)
}

async fn create(
    Extension(store): Extension<Store>,
    Json(body): Json<CreateProduct>,
) -> axum::response::Response {
    if body.sku.trim().is_empty() || body.name.trim().is_empty() {
        return json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "sku and name must be non-empty",
        );
    }

    let product = Product {
        id: Uuid::now_v7(),
        sku: body.sku,
        name: body.name,
    };
    store.write().unwrap().insert(product.id, product.clone());

    (StatusCode::CREATED, Json(product)).into_response()
}

async fn fetch(
    Extension(store): Extension<Store>,
    Path(id): Path<Uuid>,
) -> axum::response::Response {
    match store.read().unwrap().get(&id) {
        Some(product) => Json(product.clone()).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

async fn remove(
    Extension(store): Extension<Store>,
    Path(id): Path<Uuid>,
) -> axum::response::Response {
    match store.write().unwrap().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}
