//! Domain core for the todo service.
//!
//! # Overview
//! Holds the types shared by the HTTP layer and the persistence gateway: the
//! `Todo` wire shape and its request payloads, the list filter, the response
//! envelope and the error taxonomy. No I/O happens here.
//!
//! # Design
//! - `Envelope` is plain data; pairing it with an HTTP status is the server's
//!   job.
//! - `TodoError` knows its status code so every layer agrees on the mapping.

pub mod envelope;
pub mod error;
pub mod types;

pub use envelope::{Envelope, ResponseStatus};
pub use error::{Result, TodoError};
pub use types::{CreateTodo, Todo, TodoFilter, UpdateTodo};
