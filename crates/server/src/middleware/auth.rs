//! Authentication extractor.
//!
//! Provides an extractor for requiring a verified bearer token in route
//! handlers. The decoded identity is an explicit handler argument, never
//! ambient request state.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use longbox_core::UserId;

use crate::services::auth::verify_token;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(user: AuthUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// ID of the authenticated user.
    pub id: UserId,
    /// Email the token was issued to.
    pub email: String,
}

/// Error returned when a bearer token is missing or invalid.
pub enum AuthRejection {
    /// No Authorization header, or not a Bearer scheme (401).
    MissingToken,
    /// Token failed signature or expiry verification (403).
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "No token provided"),
            Self::InvalidToken => (StatusCode::FORBIDDEN, "Invalid token"),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthRejection::MissingToken)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthRejection::MissingToken)?;

        let claims = verify_token(token, &state.config().jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "token verification failed");
            AuthRejection::InvalidToken
        })?;

        // A verified signature with a non-numeric subject means a foreign
        // token signed with our key; treat it as invalid rather than panic
        let id = claims.user_id().ok_or(AuthRejection::InvalidToken)?;

        Ok(Self {
            id,
            email: claims.email,
        })
    }
}
