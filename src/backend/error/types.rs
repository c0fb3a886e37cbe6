/**
 * API Error Types
 *
 * This module defines the error taxonomy shared by every handler and by the
 * authentication middleware. Each variant maps to exactly one HTTP status.
 *
 * # Error Categories
 *
 * - `Validation` - malformed or missing input (400)
 * - `Conflict` - a unique constraint was violated (409)
 * - `Unauthorized` - missing or invalid credential (401)
 * - `Forbidden` - authenticated but not permitted (403)
 * - `NotFound` - the addressed resource does not exist (404)
 * - `Internal` - store, hashing or token-signing failure (500)
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors returned by handlers and middleware
///
/// # Usage
///
/// ```rust
/// use snsapp::backend::error::ApiError;
///
/// let err = ApiError::validation("username and password are required");
/// assert_eq!(err.status_code().as_u16(), 400);
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Unique constraint violated (e.g. username already taken)
    #[error("{0}")]
    Conflict(String),

    /// Missing or invalid credential
    ///
    /// Deliberately carries no detail: a bad username and a bad password
    /// must render the same body.
    #[error("unauthorized")]
    Unauthorized,

    /// Authenticated, but not allowed to touch this resource
    #[error("forbidden")]
    Forbidden,

    /// Resource absent
    #[error("{0}")]
    NotFound(String),

    /// Store or codec failure; the detail is logged, never rendered
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `Forbidden` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 409 Conflict
    /// - `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Internal errors collapse to a fixed string.
    pub fn message(&self) -> String {
        match self {
            Self::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                tracing::warn!("Unique constraint violated: {}", db_err);
                return Self::conflict("username is already taken");
            }
        }
        tracing::error!("Database error: {:?}", err);
        Self::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        tracing::error!("Blocking task failed: {:?}", err);
        Self::Internal(err.to_string())
    }
}
