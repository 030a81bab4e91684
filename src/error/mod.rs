//! Unified error handling for CMS Core

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ApiResponse;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Message returned for every failed permission check.
pub const PERMISSION_DENIED_MESSAGE: &str = "Permission denied";

/// Message returned for every failed login, whichever field was wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid account name or secret";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{}", PERMISSION_DENIED_MESSAGE)]
    PermissionDenied,

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for failures of the aggregate store or its encoding.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            AppError::Persistence(_)
                | AppError::Database(_)
                | AppError::Redis(_)
                | AppError::Serialization(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::PermissionDenied => {
                (StatusCode::FORBIDDEN, PERMISSION_DENIED_MESSAGE.to_string())
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                INVALID_CREDENTIALS_MESSAGE.to_string(),
            ),
            AppError::Persistence(_)
            | AppError::Database(_)
            | AppError::Redis(_)
            | AppError::Serialization(_) => {
                tracing::error!("Aggregate store error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::fail(message))).into_response()
    }
}

// Conversion from validation errors
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}
