//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed required field, always caller-fixable
    #[error("{0}")]
    Validation(String),

    /// Login failed; deliberately identical for unknown email and wrong password
    #[error("invalid credentials")]
    InvalidCredential,

    /// Missing, expired or garbled bearer token
    #[error("missing or invalid authentication token")]
    InvalidCapability,

    /// Record absent, or owned by another technician (never distinguished)
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Registration conflict on an already-known email
    #[error("email is already registered")]
    DuplicateIdentity,

    /// Underlying persistence failure; details are logged, never surfaced
    #[error("internal server error")]
    Storage,
}

impl ApiError {
    /// Log a persistence failure with its operation context and collapse it
    /// into the opaque `Storage` variant.
    pub fn storage(context: &'static str, err: impl std::fmt::Display) -> Self {
        error!("storage failure while {context}: {err}");
        ApiError::Storage
    }

    /// HTTP status code for the error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredential | ApiError::InvalidCapability => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateIdentity => StatusCode::CONFLICT,
            ApiError::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
