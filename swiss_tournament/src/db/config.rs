//! Database configuration module.
//!
//! Provides configuration structures for database connection management.

use std::env;
use std::time::Duration;

/// Default PostgreSQL URL for local development
pub const DEVELOPMENT_DATABASE_URL: &str = "postgres://postgres@localhost/tournament";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,

    /// Maximum connection lifetime in seconds
    pub max_lifetime_secs: u64,

    /// Per-statement timeout in milliseconds
    pub query_timeout_ms: u64,
}

impl DatabaseConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `DATABASE_URL`: PostgreSQL connection string (default: [`DEVELOPMENT_DATABASE_URL`])
    /// - `DB_MAX_CONNECTIONS`: Maximum pool size (default: 5)
    /// - `DB_MIN_CONNECTIONS`: Minimum pool size (default: 1)
    /// - `DB_CONNECTION_TIMEOUT`: Connection timeout in seconds (default: 10)
    /// - `DB_IDLE_TIMEOUT`: Idle timeout in seconds (default: 600)
    /// - `DB_MAX_LIFETIME`: Max lifetime in seconds (default: 1800)
    /// - `DB_QUERY_TIMEOUT_MS`: Per-statement timeout in milliseconds (default: 5000)
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::development();
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_env_or("DB_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: parse_env_or("DB_MIN_CONNECTIONS", defaults.min_connections),
            connection_timeout_secs: parse_env_or(
                "DB_CONNECTION_TIMEOUT",
                defaults.connection_timeout_secs,
            ),
            idle_timeout_secs: parse_env_or("DB_IDLE_TIMEOUT", defaults.idle_timeout_secs),
            max_lifetime_secs: parse_env_or("DB_MAX_LIFETIME", defaults.max_lifetime_secs),
            query_timeout_ms: parse_env_or("DB_QUERY_TIMEOUT_MS", defaults.query_timeout_ms),
        }
    }

    /// Create a default configuration for development
    ///
    /// Uses `postgres://postgres@localhost/tournament` as the database URL
    pub fn development() -> Self {
        Self {
            database_url: DEVELOPMENT_DATABASE_URL.to_string(),
            max_connections: 5,
            min_connections: 1,
            connection_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            query_timeout_ms: 5000,
        }
    }

    /// Per-statement timeout
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::development()
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_defaults() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url, DEVELOPMENT_DATABASE_URL);
        assert!(config.max_connections >= config.min_connections);
        assert_eq!(config.query_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_parse_env_or_falls_back() {
        let value: u32 = parse_env_or("SWISS_TOURNAMENT_SURELY_UNSET_VAR", 42);
        assert_eq!(value, 42);
    }
}
