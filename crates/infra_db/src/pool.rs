//! PostgreSQL pool and schema migrations

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Pool settings for the lending database
///
/// ```rust
/// use infra_db::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("postgres://localhost/lending")
///     .connections(2, 20)
///     .acquire_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    /// Connections kept open while idle
    pub min_connections: u32,
    pub max_connections: u32,
    /// How long a query waits for a free connection
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            min_connections: 0,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the pool bounds; `min` is clamped to `max`
    pub fn connections(mut self, min: u32, max: u32) -> Self {
        self.max_connections = max.max(1);
        self.min_connections = min.min(self.max_connections);
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

/// Opens a pool against the configured database
///
/// # Errors
///
/// Returns `DatabaseError::ConnectionFailed` when no connection can be made
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(
        min_connections = config.min_connections,
        max_connections = config.max_connections,
        acquire_timeout_secs = config.acquire_timeout.as_secs(),
        "Connecting to lending database"
    );

    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))
}

/// Applies the schema migrations in `migrations/` at the workspace root
///
/// Migrations are embedded at compile time and applied in version order.
/// Already applied versions are skipped.
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_bounds() {
        let config = DatabaseConfig::new("postgres://test").connections(5, 20);
        assert_eq!((config.min_connections, config.max_connections), (5, 20));

        let clamped = DatabaseConfig::new("postgres://test").connections(8, 0);
        assert_eq!((clamped.min_connections, clamped.max_connections), (1, 1));
    }

    #[test]
    fn test_acquire_timeout() {
        let config = DatabaseConfig::new("postgres://test").acquire_timeout(Duration::from_secs(3));
        assert_eq!(config.acquire_timeout, Duration::from_secs(3));
        assert_eq!(config.url, "postgres://test");
    }
}
