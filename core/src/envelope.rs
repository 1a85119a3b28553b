//! Uniform JSON envelope wrapped around every API response.
//!
//! # Design
//! Every response body has the same top-level shape so clients can branch on
//! `status` without looking at the HTTP status line:
//!
//! ```json
//! {"status":"success","message":"Todo fetched successfully","data":{...}}
//! {"status":"error","message":"Todo not found","error":"todo not found"}
//! ```
//!
//! `data` and `error` are omitted when empty. The envelope is plain data; the
//! server crate pairs it with a status code when writing the response.

use serde::{Deserialize, Serialize};

/// Outcome class of a response, derived from its status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

impl ResponseStatus {
    /// Codes in `[100, 400)` are successes, everything else is an error.
    pub fn from_code(code: u16) -> Self {
        if (100..400).contains(&code) {
            ResponseStatus::Success
        } else {
            ResponseStatus::Error
        }
    }
}

/// Response body shared by all endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Build an envelope for `code`, placing `payload` under `data`.
    pub fn new(code: u16, message: impl Into<String>, payload: Option<T>) -> Self {
        Self {
            status: ResponseStatus::from_code(code),
            message: message.into(),
            data: payload,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

impl Envelope<()> {
    /// Build an error envelope for `code` with an optional detail string.
    pub fn failure(code: u16, message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            status: ResponseStatus::from_code(code),
            message: message.into(),
            data: None,
            error: detail,
        }
    }
}
