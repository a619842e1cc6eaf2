//! Error types for hookline
//!
//! Selection itself never raises user-visible errors; it always returns a
//! best-effort segment with the fallback tier recorded in the selection
//! reason. The errors here cover the service boundary (`ApiError`) and the
//! two external collaborators (`CollaboratorError`), whose failures are
//! treated as data by the orchestrator, not as control flow.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Collaborator failure, recovered locally by advancing the fallback chain.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// Call exceeded its deadline
    #[error("Request timed out")]
    Timeout,

    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response from the collaborator
    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Failed to parse the collaborator's response
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CollaboratorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CollaboratorError::Timeout
        } else if err.is_decode() {
            CollaboratorError::Parse(err.to_string())
        } else {
            CollaboratorError::Network(err.to_string())
        }
    }
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Other(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
