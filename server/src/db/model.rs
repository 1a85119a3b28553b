//! Database row types for Diesel ORM and their mapping to the wire `Todo`.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use todo_core::Todo;

use super::schema::todos;

/// Database row for a todo (queryable).
#[derive(Queryable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TodoRow {
    pub id: i32,
    pub title: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
}

/// Database row for a todo (insertable). `id` is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = todos)]
pub struct NewTodoRow<'a> {
    pub title: &'a str,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Column values written back by an update.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = todos)]
pub struct TodoChanges<'a> {
    pub title: &'a str,
    pub completed: bool,
    pub updated_at: NaiveDateTime,
}

impl From<TodoRow> for Todo {
    /// Timestamps are stored as naive UTC.
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            title: row.title,
            completed: row.completed,
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
            deleted_at: row.deleted_at.map(|at| at.and_utc()),
        }
    }
}

impl<'a> TodoChanges<'a> {
    pub fn from_todo(todo: &'a Todo, now: NaiveDateTime) -> Self {
        Self {
            title: &todo.title,
            completed: todo.completed,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn row_maps_to_todo_in_utc() {
        let row = TodoRow {
            id: 7,
            title: "Water plants".to_string(),
            completed: true,
            created_at: at(8),
            updated_at: at(9),
            deleted_at: Some(at(10)),
        };
        let todo = Todo::from(row);
        assert_eq!(todo.id, 7);
        assert_eq!(todo.title, "Water plants");
        assert!(todo.completed);
        assert_eq!(todo.created_at.to_rfc3339(), "2024-05-01T08:00:00+00:00");
        assert_eq!(todo.updated_at.naive_utc(), at(9));
        assert_eq!(todo.deleted_at.map(|d| d.naive_utc()), Some(at(10)));
        assert!(todo.is_deleted());
    }

    #[test]
    fn changes_copy_mutable_fields_only() {
        let todo = Todo::from(TodoRow {
            id: 1,
            title: "Old".to_string(),
            completed: false,
            created_at: at(1),
            updated_at: at(1),
            deleted_at: None,
        });
        let changes = TodoChanges::from_todo(&todo, at(5));
        assert_eq!(changes.title, "Old");
        assert!(!changes.completed);
        assert_eq!(changes.updated_at, at(5));
    }
}
