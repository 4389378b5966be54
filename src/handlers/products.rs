//! Product catalog listing.

use axum::Json;

use crate::domain::product::{Product, PRODUCTS};

/// GET /products
pub async fn list_products() -> Json<&'static [Product]> {
    Json(PRODUCTS)
}
