//! HTTP service exposing CRUD operations over todos stored in SQLite.
//!
//! # Overview
//! `app` builds the axum router; `serve` runs it on a listener until a
//! shutdown future resolves. The persistence gateway is created once by the
//! caller and injected through [`AppState`].

use std::future::Future;
use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use todo_core::TodoError;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod response;
pub mod store;

use crate::store::TodoStore;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TodoStore>,
}

impl AppState {
    pub fn new<S: TodoStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Run a gateway call on tokio's blocking pool.
    pub async fn run<T, F>(&self, op: F) -> todo_core::Result<T>
    where
        F: FnOnce(&dyn TodoStore) -> todo_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| TodoError::Storage(e.to_string()))?
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/todos", get(handlers::list_todos).post(handlers::create_todo))
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route("/todos/{id}/complete", put(handlers::complete_todo))
        .route("/todos/{id}/uncomplete", put(handlers::uncomplete_todo))
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Serve forever.
pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    serve(listener, state, std::future::pending()).await
}
