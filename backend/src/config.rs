//! Configuration management for the Inventory Ledger
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with INV prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Which store backs the ledger
    pub storage: StorageConfig,

    /// Database configuration, used by the postgres backend
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Query limits
    pub inventory: InventoryConfig,

    /// Remote store client
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
    /// Another ledger instance reached over HTTP
    Remote,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::Postgres => "postgres",
            StorageBackend::Remote => "remote",
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    /// Upper bound applied to requested page sizes
    pub max_page_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Base URL of another ledger instance, e.g. `http://localhost:3000`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("INV_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("storage.backend", "memory")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("inventory.max_page_size", 100)?
            .set_default("client.timeout_secs", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (INV prefix)
            .add_source(
                Environment::with_prefix("INV")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject combinations that would only fail later at runtime
    pub fn validate(&self) -> AppResult<()> {
        if self.storage.backend == StorageBackend::Postgres
            && self.database.url.as_deref().map_or(true, str::is_empty)
        {
            return Err(AppError::Configuration(
                "storage.backend = postgres requires database.url".to_string(),
            ));
        }
        if self.storage.backend == StorageBackend::Remote
            && self.client.base_url.as_deref().map_or(true, str::is_empty)
        {
            return Err(AppError::Configuration(
                "storage.backend = remote requires client.base_url".to_string(),
            ));
        }
        if self.inventory.max_page_size == 0 {
            return Err(AppError::Configuration(
                "inventory.max_page_size must be at least 1".to_string(),
            ));
        }
        if self.client.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "client.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            database: DatabaseConfig::default(),
            inventory: InventoryConfig::default(),
            client: ClientConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            min_connections: 2,
            acquire_timeout_secs: 30,
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { max_page_size: 100 }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Postgres;
        assert!(matches!(
            config.validate(),
            Err(AppError::Configuration(_))
        ));

        config.database.url = Some("postgres://localhost/inventory".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remote_requires_base_url() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Remote;
        assert!(config.validate().is_err());

        config.client.base_url = Some("http://ledger:3000".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_page_limit_rejected() {
        let mut config = Config::default();
        config.inventory.max_page_size = 0;
        assert!(config.validate().is_err());
    }
}
