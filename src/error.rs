//! Error handling for the bus tracker
//!
//! Centralized error types and handling for the application.

use crate::models::{FilterError, NoveltyError};
use crate::services::api_client::ClientError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Invalid novelty: {0}")]
    Novelty(#[from] NoveltyError),

    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Client(ClientError::NotFound { .. }) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Client(ClientError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Client(ClientError::Network(_)) => StatusCode::BAD_GATEWAY,
            AppError::Novelty(_) | AppError::Filter(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Client(ClientError::NotFound { .. }) | AppError::NotFound(_) => "NotFound",
            AppError::Client(ClientError::Timeout { .. }) => "Timeout",
            AppError::Client(ClientError::Network(_)) => "NetworkError",
            AppError::Novelty(_) => "InvalidNovelty",
            AppError::Filter(_) => "InvalidFilter",
            AppError::Validation(_) => "ValidationError",
        }
    }

    /// Check if this error should be logged as an error vs warning
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    pub fn validation_error(message: &str) -> Self {
        AppError::Validation(message.to_string())
    }

    pub fn not_found(resource: &str) -> Self {
        AppError::NotFound(resource.to_string())
    }
}

/// Malformed request bodies get the same envelope as every other error
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        if self.is_server_error() {
            tracing::error!(error = %message, code = error_code, "Request failed");
        } else {
            tracing::warn!(error = %message, code = error_code, "Request rejected");
        }

        let timestamp = chrono::Utc::now().timestamp();
        let body = Json(json!({
            "error": error_code,
            "message": message,
            "timestamp": timestamp
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
