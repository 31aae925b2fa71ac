// src/ports/http/server.rs
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::{router, AppContext};
use crate::domain::AppInfo;
use crate::infrastructure::sqlite::seed_sample_data;
use crate::infrastructure::{
    Config, DatabasePool, PoolConfig, SqliteAuthorRepository, SqliteNoteRepository,
};
use crate::ports::shell::AppShell;

/// Wire repositories and shell from config. Seeding happens here, once per process.
pub fn build_app(config: &Config) -> Result<axum::Router> {
    let pool = DatabasePool::open(&config.database.path, PoolConfig::from(&config.database))
        .with_context(|| {
            format!(
                "Failed to open database at {}",
                config.database.path.display()
            )
        })?;
    pool.health_check().context("Database health check failed")?;
    info!(path = %pool.path().display(), "Database ready");

    if config.app.seed_sample_data {
        seed_sample_data(&pool).context("Failed to seed sample data")?;
    }

    let info = AppInfo {
        version: config.app.version(),
        environment: config.app.environment.clone(),
    };
    let shell = AppShell::load(&config.server.static_dir, &info);
    let ctx = AppContext::new(
        Arc::new(SqliteNoteRepository::new(pool.clone())),
        Arc::new(SqliteAuthorRepository::new(pool)),
        info,
    );

    Ok(router(ctx, shell))
}

pub async fn serve(config: Config) -> Result<()> {
    let app = build_app(&config)?;

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.bind))?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        environment = %config.app.environment,
        "Server running at: http://{addr}/"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
