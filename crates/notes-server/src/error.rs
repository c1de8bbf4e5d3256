//! API error types with JSON responses.
//!
//! Every error leaving the server is rendered as the fixed body
//! `{status, message, timestamp}`. Internal detail (database messages,
//! hash-library errors) never reaches the client; only the translated
//! message does.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use notes_store::StoreError;
use serde::Serialize;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Malformed, forged or absent token (401).
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Valid signature, past expiry (401).
    #[error("token expired, please log in again")]
    ExpiredToken,

    /// Unknown email or wrong password — deliberately a single variant
    /// with a single message so the two cases are indistinguishable (401).
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Email already registered (400).
    #[error("email already registered")]
    DuplicateEmail,

    /// Password does not satisfy the strength policy (400).
    #[error("password does not meet strength requirements: {0}")]
    WeakPassword(String),

    /// Requester is authenticated but not allowed (403).
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Optimistic version mismatch (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). The message is logged, never sent.
    #[error("internal error: {0}")]
    Internal(String),

    /// Store error, mapped per variant.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::ExpiredToken => StatusCode::UNAUTHORIZED,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::DuplicateEmail => StatusCode::BAD_REQUEST,
            Self::WeakPassword(_) => StatusCode::BAD_REQUEST,
            Self::PermissionDenied(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) => match e {
                StoreError::NoteNotFound(_) => StatusCode::NOT_FOUND,
                StoreError::UserNotFound(_) => StatusCode::NOT_FOUND,
                StoreError::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
                StoreError::VersionConflict { .. } => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// The message sent to the client. Server-side failures collapse to a
    /// fixed string so no internal detail leaks.
    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "internal server error".to_string(),
            Self::Store(e) => match e {
                StoreError::NoteNotFound(id) => format!("note {id} not found"),
                StoreError::UserNotFound(_) => "user not found".to_string(),
                StoreError::DuplicateEmail(_) => "email already registered".to_string(),
                StoreError::VersionConflict { .. } => {
                    "note was modified by another request, re-read and retry".to_string()
                }
                _ => "internal server error".to_string(),
            },
            other => other.to_string(),
        }
    }
}

/// JSON error response body: `{status, message, timestamp}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable error message.
    pub message: String,
    /// RFC 3339 timestamp of the failure.
    pub timestamp: String,
}

impl ErrorBody {
    /// Build an error body for the given status and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
        }
        let body = ErrorBody::new(status, self.client_message());
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
