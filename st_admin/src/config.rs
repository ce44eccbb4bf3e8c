//! Admin tool configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use swiss_tournament::db::DatabaseConfig;

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text tables
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Complete admin configuration loaded from environment variables and flags
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Database configuration
    pub database: DatabaseConfig,
    /// Output format for command results
    pub output: OutputFormat,
}

impl AdminConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `database_url_override` - Optional database URL override (from CLI args)
    /// * `json` - Whether `--json` was passed
    ///
    /// # Errors
    ///
    /// Returns error if no database URL is available from the flag, `DATABASE_URL`
    /// or a `.env` file loaded beforehand
    pub fn from_env(
        database_url_override: Option<String>,
        json: bool,
    ) -> Result<Self, ConfigError> {
        let mut database = DatabaseConfig::from_env();

        database.database_url = database_url_override
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "DATABASE_URL".to_string(),
                hint: "Pass --db-url or set it in .env \
                       (e.g., postgres://postgres@localhost/tournament)"
                    .to_string(),
            })?;

        let output = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Ok(AdminConfig { database, output })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = &self.database.database_url;
        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            return Err(ConfigError::Invalid {
                var: "DATABASE_URL".to_string(),
                reason: "Must be a postgres:// or postgresql:// URL".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS".to_string(),
                reason: format!(
                    "Cannot exceed max connections ({})",
                    self.database.max_connections
                ),
            });
        }

        if self.database.query_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_QUERY_TIMEOUT_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(database: DatabaseConfig) -> AdminConfig {
        AdminConfig {
            database,
            output: OutputFormat::Text,
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "DATABASE_URL".to_string(),
            hint: "Use --db-url".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("DATABASE_URL"));
        assert!(msg.contains("Use --db-url"));
    }

    #[test]
    fn test_override_wins_and_sets_format() {
        let url = "postgres://admin@db/tournament".to_string();
        let config = AdminConfig::from_env(Some(url), true).unwrap();
        assert_eq!(config.database.database_url, "postgres://admin@db/tournament");
        assert_eq!(config.output, OutputFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_development_config_is_valid() {
        assert!(config_with(DatabaseConfig::development()).validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_postgres_url() {
        let config = config_with(DatabaseConfig {
            database_url: "mysql://localhost/tournament".to_string(),
            ..DatabaseConfig::development()
        });

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref var, .. } if var == "DATABASE_URL"));
    }

    #[test]
    fn test_validation_rejects_inverted_pool_bounds() {
        let config = config_with(DatabaseConfig {
            max_connections: 2,
            min_connections: 5,
            ..DatabaseConfig::development()
        });

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { ref var, .. } if var == "DB_MIN_CONNECTIONS"
        ));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = config_with(DatabaseConfig {
            query_timeout_ms: 0,
            ..DatabaseConfig::development()
        });

        assert!(config.validate().is_err());
    }
}
