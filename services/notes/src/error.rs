//! Custom error types for the notes service

use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{error::DatabaseError, response::ApiMessage};
use thiserror::Error;
use tracing::error;

use crate::export::ExportError;

/// Custom error type for the notes service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The addressed record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// A multipart body could not be read
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// Writing a file to disk failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Multipart(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "File exceeds the upload size limit".to_string(),
            ),
            ApiError::Multipart(e) => (e.status(), e.body_text()),
            ApiError::Database(e) => {
                error!("Database operation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            ApiError::Export(ExportError::InvalidFileName(name)) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid file name: {name}"),
            ),
            ApiError::Export(e) => {
                error!("File export failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.user_message())
            }
        };

        (status, Json(ApiMessage::error(error_message))).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
