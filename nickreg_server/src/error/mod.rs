// Error handling module for the nickname server
//
// Every failed request answers with a JSON body {"code": <status>, "message": <text>}.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nickreg::RegistryError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Result type for API handlers
pub type Result<T> = std::result::Result<T, ApiError>;

/// Error response returned by API handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{code} {message}")]
pub struct ApiError {
    /// HTTP status code
    pub code: u16,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
        }
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad request.")
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found.")
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
    }

    /// Same status, different message
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            code: self.code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Client errors keep their text; storage failures are logged and hidden.
impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        if err.is_client_error() {
            ApiError::bad_request().with_message(err.to_string())
        } else {
            error!("Registry operation failed: {}", err);
            ApiError::internal()
        }
    }
}
