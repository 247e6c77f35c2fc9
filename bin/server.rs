// Teacher Directory - Web Server

use anyhow::{Context, Result};
use clap::Parser;
use teacher_directory::api::{router, AppState};
use teacher_directory::config::ServerConfig;
use teacher_directory::logging::init_logging;
use teacher_directory::open_database;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    let conn = open_database(&config.db)
        .with_context(|| format!("Failed to open database {}", config.db.display()))?;
    tracing::info!(db = %config.db.display(), "database opened");

    let app = router(AppState::new(conn));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}
