//! Authentication route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::User;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response for signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Create a new account and issue a bearer token.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<AuthResponse>> {
    let (email, password) = required_credentials(body.email.as_deref(), body.password.as_deref())?;

    let service = AuthService::new(state.pool(), &state.config().jwt_secret);
    let (user, token) = service
        .signup(email, password, body.name.as_deref())
        .await
        .map_err(|e| match e {
            AuthError::EmailTaken => AppError::Validation("Email already registered".to_string()),
            other => {
                tracing::error!(error = %other, "signup failed");
                AppError::Internal("Signup failed".to_string())
            }
        })?;

    Ok(Json(AuthResponse { user, token }))
}

/// Log in with email and password.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let (email, password) = required_credentials(body.email.as_deref(), body.password.as_deref())?;

    let service = AuthService::new(state.pool(), &state.config().jwt_secret);
    let (user, token) = service.login(email, password).await.map_err(|e| match e {
        AuthError::InvalidCredentials => {
            // Uniform message for unknown email and wrong password alike
            AppError::Unauthorized("Invalid credentials".to_string())
        }
        other => {
            tracing::error!(error = %other, "login failed");
            AppError::Internal("Login failed".to_string())
        }
    })?;

    Ok(Json(AuthResponse { user, token }))
}

/// Return the authenticated user's profile.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<User>> {
    let user = crate::db::UserRepository::new(state.pool())
        .get_by_id(auth.id)
        .await
        .map_err(|e| AppError::database("Failed to get user", e))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

fn required_credentials<'a>(
    email: Option<&'a str>,
    password: Option<&'a str>,
) -> Result<(&'a str, &'a str)> {
    match (email, password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => Ok((e, p)),
        _ => Err(AppError::Validation(
            "Email and password required".to_string(),
        )),
    }
}
