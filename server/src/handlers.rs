//! Request handlers for the `/todos` routes.
//!
//! Each handler is one request/response transaction: read path, query and
//! body, call the [`TodoStore`](crate::store::TodoStore) on the blocking
//! pool, and wrap the outcome in an envelope.

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use todo_core::{CreateTodo, Todo, TodoError, TodoFilter, UpdateTodo};

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

const UPDATE_FAILED: &str = "Todo could not be updated";

type HandlerResult<T> = Result<ApiResponse<T>, ApiError>;

/// Ids that are not positive integers can never match a row.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(ApiError::not_found)
}

fn path_id(path: Result<Path<String>, PathRejection>) -> Result<i32, ApiError> {
    let Path(raw) = path?;
    parse_id(&raw)
}

pub async fn list_todos(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> HandlerResult<Vec<Todo>> {
    let filter = TodoFilter::from_query(params.get("type").map(String::as_str));
    let todos = state
        .run(move |store| store.find_all(filter))
        .await
        .map_err(|e| ApiError::from_todo(e, "Todos could not be fetched"))?;
    Ok(ApiResponse::ok("Todos fetched successfully", todos))
}

pub async fn get_todo(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult<Todo> {
    let id = path_id(id)?;
    let todo = state
        .run(move |store| store.find_by_id(id))
        .await
        .map_err(|e| ApiError::from_todo(e, "Todo could not be fetched"))?;
    Ok(ApiResponse::ok("Todo fetched successfully", todo))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> HandlerResult<Todo> {
    let Json(input) = payload?;
    let todo = state
        .run(move |store| {
            // Fast path; the unique index on live titles has the final say.
            if store.find_by_title(&input.title)?.is_some() {
                return Err(TodoError::AlreadyExists);
            }
            store.insert(&input)
        })
        .await
        .map_err(|e| ApiError::from_todo(e, "Todo could not be created"))?;
    tracing::info!(id = todo.id, "todo created");
    Ok(ApiResponse::created("Todo created successfully", todo))
}

pub async fn update_todo(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> HandlerResult<Todo> {
    let id = path_id(id)?;
    let mut todo = state
        .run(move |store| store.find_by_id(id))
        .await
        .map_err(|e| ApiError::from_todo(e, UPDATE_FAILED))?;
    let Json(changes) = payload?;
    changes.apply(&mut todo);
    let todo = state
        .run(move |store| store.update(&todo))
        .await
        .map_err(|e| ApiError::from_todo(e, UPDATE_FAILED))?;
    Ok(ApiResponse::ok("Todo updated successfully", todo))
}

async fn set_completed(
    state: AppState,
    id: Result<Path<String>, PathRejection>,
    completed: bool,
) -> HandlerResult<Todo> {
    let id = path_id(id)?;
    let todo = state
        .run(move |store| {
            let mut todo = store.find_by_id(id)?;
            todo.completed = completed;
            store.update(&todo)
        })
        .await
        .map_err(|e| ApiError::from_todo(e, UPDATE_FAILED))?;
    Ok(ApiResponse::ok("Todo updated successfully", todo))
}

pub async fn complete_todo(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult<Todo> {
    set_completed(state, id, true).await
}

pub async fn uncomplete_todo(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult<Todo> {
    set_completed(state, id, false).await
}

/// Soft-deletes the todo and answers with its last known state.
pub async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> HandlerResult<Todo> {
    let id = path_id(id)?;
    let todo = state
        .run(move |store| {
            store.find_by_id(id)?;
            store.soft_delete(id)
        })
        .await
        .map_err(|e| ApiError::from_todo(e, "Todo could not be deleted"))?;
    tracing::info!(id = todo.id, "todo deleted");
    Ok(ApiResponse::ok("Todo deleted successfully", todo))
}

pub async fn route_not_found() -> ApiError {
    ApiError::route_not_found()
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
