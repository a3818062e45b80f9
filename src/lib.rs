use tokio::signal;

use crate::config::{Config, RetryPolicy};
use crate::db::SqliteStore;
use crate::error::StartupError;
use crate::routes::AppState;

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

/// Connects, migrates, and serves until Ctrl-C or SIGTERM.
pub async fn run(config: Config) -> Result<(), StartupError> {
    let pool = db::connect(&config.database_url, RetryPolicy::default()).await?;
    db::sync_schema(&pool).await?;

    let store = SqliteStore::new(pool);
    let app = routes::build_router(AppState::new(store.clone()), config.dev_mode);

    let listener = tokio::net::TcpListener::bind(&config.address)
        .await
        .map_err(StartupError::Bind)?;

    tracing::info!("Starting server on http://{}", config.address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    store.pool().close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
