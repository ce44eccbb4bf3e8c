//! Database module providing PostgreSQL connection pooling and the tournament store.
//!
//! Connections are checked out of the pool per statement and returned when
//! the statement finishes, on success and on error alike.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

pub mod config;
pub mod memory;
pub mod repository;
pub mod schema;
pub mod timeouts;

pub use config::DatabaseConfig;
pub use memory::InMemoryRepository;
pub use repository::{PgTournamentRepository, TournamentRepository};

use timeouts::{TimeoutResult, with_timeout};

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    query_timeout: Duration,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use swiss_tournament::db::{Database, DatabaseConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), sqlx::Error> {
    ///     let config = DatabaseConfig::from_env();
    ///     let db = Database::new(&config).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
            .connect(&config.database_url)
            .await?;
        log::info!(
            "Tournament store pool ready ({}..{} connections, {}ms query timeout)",
            config.min_connections,
            config.max_connections,
            config.query_timeout_ms
        );

        Ok(Self {
            pool,
            query_timeout: config.query_timeout(),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Per-statement timeout from [`DatabaseConfig::query_timeout_ms`]
    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// PostgreSQL tournament repository sharing this pool and its query timeout
    pub fn repository(&self) -> PgTournamentRepository {
        PgTournamentRepository::new(Arc::new(self.pool.clone()))
            .with_query_timeout(self.query_timeout)
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> TimeoutResult<()> {
        with_timeout(self.query_timeout, sqlx::query("SELECT 1").execute(&self.pool)).await?;
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}
