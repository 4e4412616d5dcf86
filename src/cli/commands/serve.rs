use anyhow::Context;
use tracing::info;

use crate::app::{self, AppState};
use crate::config::config;
use crate::database::DatabaseManager;
use crate::is_production;

pub async fn handle(port: Option<u16>) -> anyhow::Result<()> {
    let config = config();
    info!("Starting Jobly API in {:?} mode", config.environment);

    if is_production!() && config.security.jwt_secret.is_empty() {
        anyhow::bail!("SECRET_KEY must be set in production");
    }

    let pool = DatabaseManager::connect(config).await?;
    if config.database.auto_migrate {
        DatabaseManager::migrate(&pool).await?;
    }

    let app = app::router(AppState::new(pool.clone()), config);

    let port = port.unwrap_or(config.api.port);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Jobly API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
