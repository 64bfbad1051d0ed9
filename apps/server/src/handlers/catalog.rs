use axum::Json;
use shoelab_core::{snapshot, CatalogSnapshot};

/// `GET /api/catalog`: every option family plus the base price.
pub async fn get_catalog() -> Json<CatalogSnapshot> {
    Json(snapshot())
}
