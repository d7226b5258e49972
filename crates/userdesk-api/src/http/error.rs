//! Application error type mapping to HTTP status codes and `{"message": ...}` bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use userdesk_types::error::UserError;

use crate::http::response::MessageBody;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// No user with the requested id (or the id did not parse).
    NotFound,
    /// Body was not valid JSON for the expected shape.
    InvalidInput,
    /// Email already belongs to another user.
    Conflict,
    /// Storage failure; carries the client-facing message for the operation.
    Internal(&'static str),
}

impl AppError {
    /// Classify a service error. `failure` is the message shown to the
    /// client when storage fails, e.g. "Failed to create user".
    pub fn from_user(err: UserError, failure: &'static str) -> Self {
        match err {
            UserError::NotFound => AppError::NotFound,
            UserError::EmailTaken(_) => {
                tracing::debug!("rejected duplicate email");
                AppError::Conflict
            }
            UserError::StorageError(detail) => {
                tracing::error!(error = %detail, "{failure}");
                AppError::Internal(failure)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::InvalidInput => StatusCode::BAD_REQUEST,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AppError::NotFound => "User not found",
            AppError::InvalidInput => "Invalid input",
            AppError::Conflict => "Email already in use",
            AppError::Internal(msg) => *msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(MessageBody::new(self.message()))).into_response()
    }
}
