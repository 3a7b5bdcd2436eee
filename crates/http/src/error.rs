//! Error handling for the HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookstore_db::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Message returned whenever a keyed record is missing.
pub const RECORD_NOT_FOUND: &str = "Record Not Found.";

/// Message returned when a request body cannot be decoded.
pub const MALFORMED_BODY: &str = "Bad Request.";

/// Standard error response format for all HTTP errors
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("request timed out")]
    Timeout,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response body
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest { message } | AppError::NotFound { message } => message.clone(),
            AppError::MethodNotAllowed => "Method Not Allowed.".to_string(),
            AppError::Timeout => "Request Timeout.".to_string(),
            AppError::Internal(e) => e.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            AppError::not_found(RECORD_NOT_FOUND)
        } else {
            AppError::Internal(err.into())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                error = %message,
                "Request error"
            );
        } else {
            tracing::warn!(
                error_id = %error_id,
                status_code = %status.as_u16(),
                error = %message,
                "Request rejected"
            );
        }

        let body = ErrorEnvelope {
            error: ErrorBody {
                code: status.as_u16(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
