//! Error taxonomy for todo operations.
//!
//! # Design
//! `NotFound` and `AlreadyExists` get dedicated variants because handlers
//! answer them with fixed messages. `BadRequest` carries the decoder's
//! complaint and `Storage` the backend's, both surfaced in the envelope's
//! `error` field.

use thiserror::Error;

/// Errors produced by the persistence gateway and request handlers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// The request body could not be decoded.
    #[error("invalid request body: {0}")]
    BadRequest(String),

    /// A live todo with the same title already exists.
    #[error("todo already exists")]
    AlreadyExists,

    /// No live todo matches the requested id.
    #[error("todo not found")]
    NotFound,

    /// The backing store failed.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl TodoError {
    /// HTTP status code this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self {
            TodoError::BadRequest(_) | TodoError::AlreadyExists => 400,
            TodoError::NotFound => 404,
            TodoError::Storage(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(TodoError::BadRequest("eof".into()).status_code(), 400);
        assert_eq!(TodoError::AlreadyExists.status_code(), 400);
        assert_eq!(TodoError::NotFound.status_code(), 404);
        assert_eq!(TodoError::Storage("disk".into()).status_code(), 500);
    }

    #[test]
    fn display_includes_detail() {
        assert_eq!(TodoError::Storage("disk I/O error".into()).to_string(), "storage failure: disk I/O error");
        assert_eq!(TodoError::NotFound.to_string(), "todo not found");
    }
}
