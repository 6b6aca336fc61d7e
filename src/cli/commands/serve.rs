use anyhow::Context;
use clap::Args;
use std::sync::Arc;

use crate::app::{app, AppState};
use crate::auth::RemoteKeySource;
use crate::config;
use crate::database::{CastingStore, DatabaseManager, MemoryStore, PgRepository};

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides CASTING_API_PORT / PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Keep data in process memory instead of PostgreSQL")]
    pub in_memory: bool,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let config = config::config().clone();
    tracing::info!("Starting Casting API in {:?} mode", config.environment);

    let store: Arc<dyn CastingStore> = if args.in_memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        let pool = DatabaseManager::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        Arc::new(PgRepository::new(pool))
    };
    store.migrate().await.context("failed to create tables")?;

    let keys = RemoteKeySource::new(&config.auth).context("invalid AUTH0_DOMAIN")?;
    tracing::info!("Verifying tokens against {}", keys.jwks_url());

    let port = args.port.unwrap_or(config.api.port);
    let state = AppState::new(config, store, Arc::new(keys));

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Casting API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
