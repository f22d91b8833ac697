//! Inventory Ledger - Backend
//!
//! Purchase lots, their sales and aggregate totals, served over a small REST
//! contract with pagination, search and a remain filter.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::InventoryQuery;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};

use services::{InventoryGateway, InventoryStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InventoryStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn InventoryStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn gateway(&self) -> InventoryGateway<Arc<dyn InventoryStore>> {
        InventoryGateway::new(self.store.clone())
    }

    /// Cap the requested page size at the configured maximum
    pub fn clamp_query(&self, mut query: InventoryQuery) -> InventoryQuery {
        query.page_size = query.page_size.min(self.config.inventory.max_page_size);
        query
    }
}

/// Initialize tracing; JSON lines in production, human-readable otherwise
pub fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "inventory_server=debug,inventory_backend=debug,tower_http=debug,sqlx=warn".into()
    });

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .nest("/api", routes::api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
