//! Error type system for the airport search service
//!
//! This module provides:
//! - A single crate-wide error enum
//! - HTTP status code mapping
//! - JSON error bodies carrying a trace ID
//!
//! Server-side failures never leak their cause to the caller; the cause is
//! logged and the response body carries a fixed message.

use crate::auth::AuthRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Message returned to callers for every 5xx outcome
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Main error type for the airport search service
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // System-level errors
    #[error("System initialization failed: {0}")]
    InitializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Store errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Task error: {0}")]
    TaskError(String),

    // Request outcomes
    #[error("{0}")]
    AuthenticationError(AuthRejection),

    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,

            AppError::NotFound(_) => StatusCode::NOT_FOUND,

            AppError::InitializationError(_)
            | AppError::ConfigError(_)
            | AppError::DatabaseError(_)
            | AppError::PoolError(_)
            | AppError::TaskError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error type name for API responses
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InitializationError(_) => "InitializationError",
            AppError::ConfigError(_) => "ConfigError",
            AppError::DatabaseError(_) => "DatabaseError",
            AppError::PoolError(_) => "DatabaseError",
            AppError::TaskError(_) => "TaskError",
            AppError::AuthenticationError(_) => "AuthenticationError",
            AppError::NotFound(_) => "NotFound",
        }
    }

    /// Message safe to hand back to the caller
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl From<AuthRejection> for AppError {
    fn from(rejection: AuthRejection) -> Self {
        AppError::AuthenticationError(rejection)
    }
}

/// Error response structure for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error type identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique trace ID for this error
    pub trace_id: String,
}

impl ErrorResponse {
    /// Create an error response from an AppError with a generated trace ID
    pub fn from_error(error: &AppError) -> Self {
        Self::from_error_with_trace_id(error, Uuid::new_v4().to_string())
    }

    /// Create an error response from an AppError with a specific trace ID
    pub fn from_error_with_trace_id(error: &AppError, trace_id: String) -> Self {
        let error_type = if error.status_code().is_server_error() {
            "InternalError"
        } else {
            error.error_type()
        };

        Self {
            error: error_type.to_string(),
            message: error.public_message(),
            trace_id,
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} (trace_id: {})", self.error, self.message, self.trace_id)
    }
}

impl AppError {
    /// Render this error as a response tagged with the given trace ID
    pub fn into_response_with_trace_id(self, trace_id: String) -> Response {
        let status_code = self.status_code();
        let error_response = ErrorResponse::from_error_with_trace_id(&self, trace_id);

        if status_code.is_server_error() {
            tracing::error!(
                error_type = self.error_type(),
                trace_id = %error_response.trace_id,
                status_code = %status_code,
                "Request failed: {}",
                self
            );
        } else {
            tracing::debug!(
                error_type = self.error_type(),
                trace_id = %error_response.trace_id,
                status_code = %status_code,
                "Request rejected: {}",
                self
            );
        }

        (status_code, Json(error_response)).into_response()
    }
}

/// Implement IntoResponse for AppError to enable automatic error handling in Axum
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with_trace_id(Uuid::new_v4().to_string())
    }
}

/// Result type alias for operations that can fail with AppError
pub type Result<T> = std::result::Result<T, AppError>;
