// handlers/public/auth/register.rs - POST /api/user/register

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::EMAIL_EXISTS;
use crate::auth::password::hash_password;
use crate::database::models::NewUser;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::validate_registration;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

const CONTEXT: &str = "Error registering user";

/// POST /api/user/register - create an account
///
/// Input: `{ "name", "email", "password" }`, each 6–255 characters.
///
/// Output (201):
/// ```json
/// { "error": null, "data": "<user id>" }
/// ```
///
/// 400 on a validation failure or an email that is already registered.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Uuid> {
    let Json(body) = payload?;
    validate_registration(&body)?;
    let request: RegisterRequest =
        serde_json::from_value(body).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let existing = state
        .store
        .find_user_by_email(&request.email)
        .await
        .map_err(|e| ApiError::internal(CONTEXT, e))?;
    if existing.is_some() {
        tracing::info!("Registration refused, email already in use");
        return Err(ApiError::bad_request(EMAIL_EXISTS));
    }

    let password_hash = hash_password(&request.password, state.bcrypt_cost)
        .await
        .map_err(|e| ApiError::internal(CONTEXT, e))?;

    let new_user = NewUser {
        name: request.name,
        email: request.email,
        password_hash,
    };

    // the lookup above can race; the store's unique rule is authoritative
    let user = match state.store.insert_user(new_user).await {
        Ok(user) => user,
        Err(DatabaseError::Duplicate(_)) => {
            tracing::info!("Registration lost a race on an existing email");
            return Err(ApiError::bad_request(EMAIL_EXISTS));
        }
        Err(e) => return Err(ApiError::internal(CONTEXT, e)),
    };

    tracing::info!("Registered user {}", user.id);
    Ok(ApiResponse::created(user.id))
}
