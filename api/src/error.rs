//! Unified error types for the Storefront API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `ConfigError`: Start-up configuration errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A destructive operation was refused because other records still
    /// reference the target.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration errors raised while reading the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Malformed connection string segment: {0}")]
    MalformedPair(String),

    #[error("Connection string is missing `{0}`")]
    MissingParam(&'static str),

    #[error("Invalid port: {0}")]
    InvalidPort(String),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON whose fields have the wrong type or range
            JsonRejection::JsonDataError(err) => {
                AppError::Domain(DomainError::Validation(err.body_text()))
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                AppError::NotFound(err.body_text())
            }
            // Route and handler disagree on the parameters
            other => AppError::Domain(DomainError::Internal(other.body_text())),
        }
    }
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found".to_string(), Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error".to_string(),
                Some(msg.clone()),
            ),
            // Guard rejections carry their message as the error itself
            AppError::Domain(DomainError::Conflict(msg)) => {
                (StatusCode::METHOD_NOT_ALLOWED, msg.clone(), None)
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "Bad request".to_string(),
                Some(msg.clone()),
            ),
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "Not found".to_string(), Some(msg.clone()))
            }
        };

        let body = Json(ErrorResponse { error, details });

        (status, body).into_response()
    }
}
