//! HTTP side of the response envelope.
//!
//! [`ApiResponse`] and [`ApiError`] pair an [`Envelope`] with a status code
//! and render it through `axum::Json`, which sets
//! `Content-Type: application/json`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use todo_core::{Envelope, TodoError};

/// A successful response carrying `data`.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    envelope: Envelope<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, message: &str, data: T) -> Self {
        Self {
            status,
            envelope: Envelope::new(status.as_u16(), message, Some(data)),
        }
    }

    pub fn ok(message: &str, data: T) -> Self {
        Self::new(StatusCode::OK, message, data)
    }

    pub fn created(message: &str, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

/// A failed request, rendered as an error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            status,
            message: message.into(),
            detail,
        }
    }

    pub fn not_found() -> Self {
        Self::from_todo(TodoError::NotFound, "Todo not found")
    }

    pub fn route_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Route not found", None)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
    }

    /// Map a gateway error to its envelope. `failure` is the message used for
    /// storage failures, e.g. "Todo could not be created".
    pub fn from_todo(err: TodoError, failure: &str) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match err {
            TodoError::BadRequest(detail) => Self::new(status, "Invalid request body", Some(detail)),
            TodoError::AlreadyExists => {
                Self::new(status, "Todo already exists", Some(err.to_string()))
            }
            TodoError::NotFound => Self::new(status, "Todo not found", Some(err.to_string())),
            TodoError::Storage(detail) => {
                tracing::error!(error = %detail, "{failure}");
                Self::new(status, failure, Some(detail))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::from_todo(TodoError::BadRequest(rejection.body_text()), "Invalid request body")
    }
}

/// A path segment that does not even decode cannot name a todo.
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        Self::not_found()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if !self.status.is_server_error() {
            tracing::debug!(status = %self.status, message = %self.message, "request failed");
        }
        let envelope = Envelope::failure(self.status.as_u16(), self.message, self.detail);
        (self.status, Json(envelope)).into_response()
    }
}
