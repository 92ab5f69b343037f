// handlers/public/products.rs - catalog reads

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::database::models::Product;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/products - every product, unpaginated
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .store
        .list_products()
        .await
        .map_err(|e| ApiError::internal("Error retrieving product", e))?;
    Ok(Json(products))
}

/// GET /api/products/:id - zero or one product, always as an array.
///
/// An id that is not a UUID cannot match anything and yields `[]`.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Ok(id) = Uuid::parse_str(&id) else {
        tracing::debug!("Product lookup with malformed id {:?}", id);
        return Ok(Json(Vec::new()));
    };

    let products = state
        .store
        .find_products_by_id(id)
        .await
        .map_err(|e| ApiError::internal("Error retrieving product", e))?;
    Ok(Json(products))
}
