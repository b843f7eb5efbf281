//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{cors_layer, create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::{Config, IN_MEMORY_DATABASE_URL};
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, InMemoryUserStore, UserRepository, UserStore};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    let (users, database) = open_store(&config).await?;
    let app_state = AppState::from_store(users, database, &config)?;

    // Build router
    let app = create_router(app_state).layer(cors_layer(&config.cors_allowed_origins));

    // Start server
    let host = args.host.unwrap_or_else(|| config.server_host.clone());
    let port = args.port.unwrap_or(config.server_port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Pick the credential store named by `DATABASE_URL`.
async fn open_store(
    config: &Config,
) -> AppResult<(Arc<dyn UserRepository>, Option<Arc<Database>>)> {
    if config.database_url == IN_MEMORY_DATABASE_URL {
        tracing::warn!("Using in-memory credential store; accounts are lost on restart");
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserStore::new());
        return Ok((users, None));
    }

    let database = Arc::new(Database::connect(&config.database_url).await?);
    tracing::info!("Database connected");

    let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(database.get_connection()));
    Ok((users, Some(database)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
