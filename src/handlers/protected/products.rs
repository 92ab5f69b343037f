// handlers/protected/products.rs - catalog writes (token required)

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::{NewProduct, Product, ProductPatch};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

fn not_found(id: &str) -> ApiError {
    ApiError::not_found(format!("Product with id {} not found", id))
}

/// POST /api/products - insert the given product and echo the stored document
///
/// `_createdBy` defaults to the caller when the body leaves it out.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(body) = payload?;
    let mut product: NewProduct = serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid product: {}", e)))?;

    if product.created_by.is_none() {
        product.created_by = Some(user.id.to_string());
    }

    let product = state
        .store
        .insert_product(product)
        .await
        .map_err(|e| ApiError::internal("Error creating product", e))?;

    tracing::info!("Product {} created by {}", product.id, user.id);
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:id - partial update; 404 when nothing has this id
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload?;
    let patch: ProductPatch = serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid product: {}", e)))?;

    let Ok(product_id) = Uuid::parse_str(&id) else {
        return Err(not_found(&id));
    };

    let updated = state
        .store
        .update_product(product_id, patch)
        .await
        .map_err(|e| ApiError::internal("Error updating product by id", e))?;

    match updated {
        Some(_) => {
            tracing::info!("Product {} updated by {}", product_id, user.id);
            Ok(Json(json!({ "message": "Product updated successfully" })))
        }
        None => Err(not_found(&id)),
    }
}

/// DELETE /api/products/:id - physical delete; 404 when nothing has this id
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let Ok(product_id) = Uuid::parse_str(&id) else {
        return Err(not_found(&id));
    };

    let removed = state
        .store
        .delete_product(product_id)
        .await
        .map_err(|e| ApiError::internal("Error deleting product by id", e))?;

    if !removed {
        return Err(not_found(&id));
    }

    tracing::info!("Product {} deleted by {}", product_id, user.id);
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
