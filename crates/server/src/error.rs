//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers should return
//! `Result<T, AppError>`. Responses are JSON bodies of the shape
//! `{"error": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::metron::MetronError;

/// Application-level error type for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// User-correctable input error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or malformed bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Token present but failed signature/expiry verification.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation failed. The context is the client-facing message.
    #[error("{context}: {source}")]
    Database {
        context: String,
        source: RepositoryError,
    },

    /// Catalog lookup failed. The context is the client-facing message.
    #[error("{context}: {source}")]
    Upstream {
        context: String,
        source: MetronError,
    },

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wrap a repository error with the generic message shown to clients.
    pub fn database(context: impl Into<String>, source: RepositoryError) -> Self {
        Self::Database {
            context: context.into(),
            source,
        }
    }

    /// Wrap a catalog error with the generic message shown to clients.
    pub fn upstream(context: impl Into<String>, source: MetronError) -> Self {
        Self::Upstream {
            context: context.into(),
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database { .. } | Self::Upstream { .. } | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database { .. } | Self::Upstream { .. } | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Don't expose internal error details to clients
        let message = match self {
            Self::Validation(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Internal(msg) => msg,
            Self::Database { context, .. } | Self::Upstream { context, .. } => context,
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
