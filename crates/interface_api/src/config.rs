//! API configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config/lending.{toml,yaml,json}` file, then `API_` prefixed environment
//! variables (`API_PORT`, `API_STORAGE`, ...).

use serde::Deserialize;

/// Where funding data is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL through `infra_db`
    #[default]
    Postgres,
    /// Process memory; data is lost on restart
    Memory,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Storage backend for applications and funding history
    pub storage: StorageBackend,
    /// Database URL
    pub database_url: String,
    /// Database connections kept open while idle
    pub database_min_connections: u32,
    /// Maximum pooled database connections
    pub database_max_connections: u32,
    /// Seconds a query waits for a pooled connection
    pub database_acquire_timeout_secs: u64,
    /// Apply embedded migrations at startup
    pub run_migrations: bool,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            storage: StorageBackend::Postgres,
            database_url: "postgres://localhost/lending".to_string(),
            database_min_connections: 0,
            database_max_connections: 10,
            database_acquire_timeout_secs: 30,
            run_migrations: true,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the optional config file and the environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_expiration_secs", defaults.jwt_expiration_secs.to_string())?
            .set_default("storage", "postgres")?
            .set_default("database_url", defaults.database_url)?
            .set_default("database_min_connections", i64::from(defaults.database_min_connections))?
            .set_default("database_max_connections", i64::from(defaults.database_max_connections))?
            .set_default(
                "database_acquire_timeout_secs",
                defaults.database_acquire_timeout_secs.to_string(),
            )?
            .set_default("run_migrations", defaults.run_migrations)?
            .set_default("log_level", defaults.log_level)?
            .add_source(config::File::with_name("config/lending").required(false))
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert!(config.database_min_connections <= config.database_max_connections);
        assert_eq!(config.database_acquire_timeout_secs, 30);
    }

    #[test]
    fn test_storage_backend_names() {
        let backend: StorageBackend = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(backend, StorageBackend::Memory);
        assert!(serde_json::from_str::<StorageBackend>("\"redis\"").is_err());
    }
}
