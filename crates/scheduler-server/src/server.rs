use anyhow::Context;
use scheduler_core::db;
use scheduler_core::repository::SqliteRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::api::build_router;
use crate::config::Config;
use crate::state::{AppState, Clock};

/// Opens the database, binds the port and serves until Ctrl+C.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let tz = config.tz()?;
    let pool = db::establish_connection(&config.db_file)
        .await
        .with_context(|| format!("failed to open database '{}'", config.db_file))?;
    let state = Arc::new(AppState::new(
        SqliteRepository::new(pool),
        Clock::System(tz),
        config.task_list_limit,
    ));

    if !config.web_dir.is_dir() {
        tracing::warn!(web_dir = %config.web_dir.display(), "static directory not found");
    }
    let app = build_router(state, &config.web_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, db = %config.db_file, timezone = %tz, "scheduler listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
