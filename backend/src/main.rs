//! Inventory Ledger - Backend Server

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use inventory_backend::{
    config::StorageBackend,
    create_app, init_tracing,
    external::InventoryApiClient,
    services::{InMemoryInventoryStore, InventoryStore, PgInventoryStore},
    AppError, AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    init_tracing(&config);
    config.validate()?;

    tracing::info!("Starting Inventory Ledger Server");
    tracing::info!("Environment: {}", config.environment);

    let store = build_store(&config).await?;
    tracing::info!("Storage backend: {}", config.storage.backend.as_str());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server.host / server.port")?;

    let app = create_app(AppState::new(store, config));

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn InventoryStore>> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryInventoryStore::new())),
        StorageBackend::Remote => {
            let client = InventoryApiClient::from_config(&config.client)?;
            tracing::info!("Proxying inventory to {}", client.base_url());
            Ok(Arc::new(client))
        }
        StorageBackend::Postgres => {
            let url = config.database.url.as_deref().ok_or_else(|| {
                AppError::Configuration("database.url is not set".to_string())
            })?;

            // Create database connection pool
            tracing::info!("Connecting to database...");
            let db_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .min_connections(config.database.min_connections)
                .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
                .connect(url)
                .await?;

            tracing::info!("Database connection established");

            // Run migrations in development
            if config.environment == "development" {
                tracing::info!("Running database migrations...");
                sqlx::migrate!("./migrations").run(&db_pool).await?;
                tracing::info!("Migrations completed");
            }

            Ok(Arc::new(PgInventoryStore::new(db_pool)))
        }
    }
}
