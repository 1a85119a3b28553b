//! Persistence gateway for todos.
//!
//! # Design
//! Handlers only see the [`TodoStore`] trait. [`SqliteTodoStore`] implements
//! it over a Diesel connection pool; every query filters out soft-deleted
//! rows (`deleted_at IS NOT NULL`) except the final read-back after a soft
//! delete. Calls are blocking, so the HTTP layer runs them on tokio's
//! blocking pool.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use todo_core::{CreateTodo, Result, Todo, TodoError, TodoFilter};

use crate::db::model::{NewTodoRow, TodoChanges, TodoRow};
use crate::db::schema::todos;
use crate::db::DbPool;

/// CRUD operations over live (not soft-deleted) todos.
pub trait TodoStore: Send + Sync {
    /// All live todos matching `filter`, ordered by id.
    fn find_all(&self, filter: TodoFilter) -> Result<Vec<Todo>>;

    /// The live todo with `id`, or [`TodoError::NotFound`].
    fn find_by_id(&self, id: i32) -> Result<Todo>;

    /// The live todo titled `title`, if any.
    fn find_by_title(&self, title: &str) -> Result<Option<Todo>>;

    /// Insert a new todo. A live title collision yields
    /// [`TodoError::AlreadyExists`].
    fn insert(&self, input: &CreateTodo) -> Result<Todo>;

    /// Persist the mutable fields of an already fetched todo.
    fn update(&self, todo: &Todo) -> Result<Todo>;

    /// Mark the todo deleted and return it as last stored.
    fn soft_delete(&self, id: i32) -> Result<Todo>;
}

/// SQLite-backed todo store.
#[derive(Clone)]
pub struct SqliteTodoStore {
    pool: DbPool,
}

type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

impl SqliteTodoStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<Conn> {
        self.pool.get().map_err(|e| TodoError::Storage(e.to_string()))
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// Translate Diesel failures into the gateway's error taxonomy.
fn map_err(err: DieselError) -> TodoError {
    match err {
        DieselError::NotFound => TodoError::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => TodoError::AlreadyExists,
        other => TodoError::Storage(other.to_string()),
    }
}

impl TodoStore for SqliteTodoStore {
    fn find_all(&self, filter: TodoFilter) -> Result<Vec<Todo>> {
        let mut conn = self.conn()?;
        let mut query = todos::table
            .filter(todos::deleted_at.is_null())
            .order(todos::id.asc())
            .select(TodoRow::as_select())
            .into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(completed) = filter.completed() {
            query = query.filter(todos::completed.eq(completed));
        }
        let rows: Vec<TodoRow> = query.load(&mut conn).map_err(map_err)?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    fn find_by_id(&self, id: i32) -> Result<Todo> {
        let mut conn = self.conn()?;
        todos::table
            .filter(todos::id.eq(id))
            .filter(todos::deleted_at.is_null())
            .select(TodoRow::as_select())
            .first::<TodoRow>(&mut conn)
            .map(Todo::from)
            .map_err(map_err)
    }

    fn find_by_title(&self, title: &str) -> Result<Option<Todo>> {
        let mut conn = self.conn()?;
        let row = todos::table
            .filter(todos::title.eq(title))
            .filter(todos::deleted_at.is_null())
            .select(TodoRow::as_select())
            .first::<TodoRow>(&mut conn)
            .optional()
            .map_err(map_err)?;
        Ok(row.map(Todo::from))
    }

    fn insert(&self, input: &CreateTodo) -> Result<Todo> {
        let mut conn = self.conn()?;
        let now = Self::now();
        let row = NewTodoRow {
            title: &input.title,
            completed: input.completed,
            created_at: now,
            updated_at: now,
        };
        conn.transaction::<_, DieselError, _>(|conn| {
            diesel::insert_into(todos::table).values(&row).execute(conn)?;
            // The partial unique index makes the live title a key.
            todos::table
                .filter(todos::title.eq(row.title))
                .filter(todos::deleted_at.is_null())
                .select(TodoRow::as_select())
                .first::<TodoRow>(conn)
        })
        .map(Todo::from)
        .map_err(map_err)
    }

    fn update(&self, todo: &Todo) -> Result<Todo> {
        let mut conn = self.conn()?;
        let changes = TodoChanges::from_todo(todo, Self::now());
        conn.transaction::<_, DieselError, _>(|conn| {
            let live = todos::table
                .filter(todos::id.eq(todo.id))
                .filter(todos::deleted_at.is_null());
            let affected = diesel::update(live.clone()).set(&changes).execute(conn)?;
            if affected == 0 {
                return Err(DieselError::NotFound);
            }
            live.select(TodoRow::as_select()).first::<TodoRow>(conn)
        })
        .map(Todo::from)
        .map_err(map_err)
    }

    fn soft_delete(&self, id: i32) -> Result<Todo> {
        let mut conn = self.conn()?;
        let now = Self::now();
        conn.transaction::<_, DieselError, _>(|conn| {
            let affected = diesel::update(
                todos::table
                    .filter(todos::id.eq(id))
                    .filter(todos::deleted_at.is_null()),
            )
            .set((todos::deleted_at.eq(Some(now)), todos::updated_at.eq(now)))
            .execute(conn)?;
            if affected == 0 {
                return Err(DieselError::NotFound);
            }
            todos::table
                .find(id)
                .select(TodoRow::as_select())
                .first::<TodoRow>(conn)
        })
        .map(Todo::from)
        .map_err(map_err)
    }
}
