// handlers/public/auth/login.rs - POST /api/user/login

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::INVALID_CREDENTIALS;
use crate::auth::password::verify_password;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, AUTH_TOKEN_HEADER};
use crate::state::AppState;
use crate::validation::validate_login;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user_id: Uuid,
    pub token: String,
}

const CONTEXT: &str = "Error logging in user";

/// POST /api/user/login - exchange credentials for a session token
///
/// Output (200), with the token repeated in the `auth-token` header:
/// ```json
/// { "error": null, "data": { "userId": "<id>", "token": "eyJhbGciOiJIUzI1NiI..." } }
/// ```
///
/// Unknown email and wrong password both answer 400 with the same message.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    validate_login(&body)?;
    let request: LoginRequest =
        serde_json::from_value(body).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let Some(user) = state
        .store
        .find_user_by_email(&request.email)
        .await
        .map_err(|e| ApiError::internal(CONTEXT, e))?
    else {
        tracing::warn!("Login failed: unknown email");
        return Err(ApiError::bad_request(INVALID_CREDENTIALS));
    };

    let valid = verify_password(&request.password, &user.password)
        .await
        .map_err(|e| ApiError::internal(CONTEXT, e))?;
    if !valid {
        tracing::warn!("Login failed: bad password for user {}", user.id);
        return Err(ApiError::bad_request(INVALID_CREDENTIALS));
    }

    let token = state
        .tokens
        .issue(&user)
        .map_err(|e| ApiError::internal(CONTEXT, e))?;

    tracing::info!("User {} logged in", user.id);
    Ok((
        [(AUTH_TOKEN_HEADER, token.clone())],
        ApiResponse::success(LoginData {
            user_id: user.id,
            token,
        }),
    ))
}
