//! Domain DTOs for the todo API.
//!
//! # Design
//! `Todo` is the wire shape of a persisted todo, timestamps included. The
//! server crate maps its diesel rows into this type; nothing here knows about
//! storage. `CreateTodo` and `UpdateTodo` are the request bodies accepted by
//! the create and update endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Whether the todo has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields keep their stored values. Any other
/// field (`id`, timestamps) is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    /// Overwrite the fields of `todo` that are present in this payload.
    pub fn apply(self, todo: &mut Todo) {
        if let Some(title) = self.title {
            todo.title = title;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

/// Which todos a list query returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TodoFilter {
    #[default]
    All,
    Completed,
    Uncompleted,
}

impl TodoFilter {
    /// Interpret the `type` query parameter. Unknown or missing values mean
    /// [`TodoFilter::All`].
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("completed") => TodoFilter::Completed,
            Some("uncompleted") => TodoFilter::Uncompleted,
            _ => TodoFilter::All,
        }
    }

    /// The `completed` value rows must have, or `None` for no constraint.
    pub fn completed(self) -> Option<bool> {
        match self {
            TodoFilter::All => None,
            TodoFilter::Completed => Some(true),
            TodoFilter::Uncompleted => Some(false),
        }
    }
}
