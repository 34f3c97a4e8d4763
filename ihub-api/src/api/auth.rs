//! Authentication middleware for ihub-api
//!
//! Validates the Bearer token from the Authorization header against the
//! configured identity-provider secret and attaches the decoded identity
//! to the request. Applied to protected routes only; health and UI pages
//! do not use this middleware.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::warn;

use ihub_common::auth::{decode_access_token, TokenData};

use crate::AppState;

/// Authentication middleware
///
/// Returns 401 Unauthorized with a WWW-Authenticate challenge if the token
/// is missing, malformed, or fails validation.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingToken)?;

    let claims = decode_access_token(
        token,
        &state.settings.jwt_secret,
        &state.settings.jwt_audience,
    )
    .ok_or(AuthError::InvalidToken)?;

    // The identity provider stores the user UUID in `sub`
    if claims.sub.is_empty() {
        return Err(AuthError::MissingSubject);
    }

    request.extensions_mut().insert(TokenData::from(claims));

    Ok(next.run(request).await)
}

/// RBAC check: the caller must have a synced user row with the brand role.
///
/// Returns 403 otherwise; the caller being unknown to the users table is
/// also a permissions failure, not a 404.
pub async fn require_brand(pool: &SqlitePool, user: &TokenData) -> Result<(), AuthError> {
    let row = crate::db::get_user(pool, &user.id)
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    match row {
        Some(record) if record.role == "brand" => Ok(()),
        Some(record) => {
            warn!(
                "User {} with role '{}' attempted a brand-only operation",
                user.id, record.role
            );
            Err(AuthError::Forbidden)
        }
        None => Err(AuthError::Forbidden),
    }
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    MissingSubject,
    Forbidden,
    Internal(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Not authenticated".to_string(),
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Could not validate credentials".to_string(),
            ),
            AuthError::MissingSubject => (
                StatusCode::UNAUTHORIZED,
                "Token missing subject (sub)".to_string(),
            ),
            AuthError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Not enough permissions".to_string(),
            ),
            AuthError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Authentication error: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
