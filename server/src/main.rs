use tokio::net::TcpListener;
use todo_server::config::Config;
use todo_server::db::{create_pool, run_migrations};
use todo_server::error::{Result, ServerError};
use todo_server::store::SqliteTodoStore;
use todo_server::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    match start().await {
        Ok(()) => tracing::info!("todo-server stopped"),
        // Logging is not up yet when the config itself is bad.
        Err(ServerError::Config(e)) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            std::process::exit(1);
        }
    }
}

async fn start() -> Result<()> {
    let config = Config::from_env()?;
    config.logging.init();

    let pool = create_pool(&config.database_url, config.pool_size)?;
    run_migrations(&pool)?;
    tracing::info!(database = %config.database_url, "database ready");

    let state = AppState::new(SqliteTodoStore::new(pool));
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    todo_server::serve(listener, state, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
