use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the session token (not `Authorization: Bearer`)
pub const AUTH_TOKEN_HEADER: &str = "auth-token";

/// Verified caller identity, attached to the request by [`require_token`]
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
        }
    }
}

/// Token gate for protected routes.
///
/// No header → 401 "Access denied."; a token that fails signature or expiry
/// checks → 401 "Invalid token.". On success the decoded identity is inserted
/// as an `AuthUser` request extension.
pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())?;

    let claims = state.tokens.verify(&token).map_err(|e| {
        tracing::warn!("Rejected token on {} {}: {}", request.method(), request.uri().path(), e);
        ApiError::unauthorized("Invalid token.")
    })?;

    tracing::debug!("Authenticated {} ({})", claims.email, claims.id);
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

fn extract_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(AUTH_TOKEN_HEADER)
        .ok_or_else(|| ApiError::unauthorized("Access denied."))?;

    let token = value
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid token."))?
        .trim();

    if token.is_empty() {
        return Err(ApiError::unauthorized("Access denied."));
    }
    Ok(token.to_string())
}
