use std::sync::Arc;

use anyhow::Context;
use shop_api::{
    auth::TokenService,
    config::AppConfig,
    database::{DatabaseManager, PgStore},
    telemetry, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, TOKEN_SECRET, etc.
    let _ = dotenvy::dotenv();
    telemetry::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!("Starting shop-api in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("database unreachable")?;
    DatabaseManager::ensure_schema(&pool).await?;

    let tokens = TokenService::from_config(&config.security)?;
    let state = AppState::new(
        Arc::new(PgStore::new(pool.clone())),
        tokens,
        config.security.bcrypt_cost,
    );

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("shop-api listening on http://{}", bind_addr);

    axum::serve(listener, shop_api::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::disconnect(pool).await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
