//! Database query timeout helpers
//!
//! Wraps single statements so an unresponsive store surfaces as an error
//! instead of hanging the caller.

use std::time::Duration;
use tokio::time::{Instant, timeout};

/// Default timeout for database queries (5 seconds)
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Statements slower than this are logged at warn level
pub const SLOW_QUERY_THRESHOLD_MS: u64 = 100;

/// Timeout for schema provisioning (30 seconds)
pub const SCHEMA_TIMEOUT: Duration = Duration::from_secs(30);

/// Error type for timeout operations
#[derive(Debug, thiserror::Error)]
pub enum TimeoutError {
    /// Operation timed out
    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for timeout operations
pub type TimeoutResult<T> = Result<T, TimeoutError>;

/// Execute a query with timeout
///
/// # Example
///
/// ```no_run
/// use swiss_tournament::db::timeouts::{with_timeout, DEFAULT_QUERY_TIMEOUT};
/// # use sqlx::PgPool;
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
///
/// let result = with_timeout(
///     DEFAULT_QUERY_TIMEOUT,
///     sqlx::query("SELECT name FROM players WHERE id = $1")
///         .bind(1)
///         .fetch_one(pool)
/// ).await?;
///
/// # Ok(())
/// # }
/// ```
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> TimeoutResult<T>
where
    F: std::future::Future<Output = Result<T, sqlx::Error>>,
{
    match timeout(duration, future).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => Err(TimeoutError::Database(e)),
        Err(_) => Err(TimeoutError::Timeout(duration)),
    }
}

/// Execute a statement with timeout and log how long it took
///
/// # Arguments
///
/// * `duration` - Timeout for the statement
/// * `query_type` - Type of query (SELECT, INSERT, DELETE)
/// * `table` - Table or view the statement targets
pub async fn timed_query<F, T>(
    duration: Duration,
    query_type: &str,
    table: &str,
    future: F,
) -> TimeoutResult<T>
where
    F: std::future::Future<Output = Result<T, sqlx::Error>>,
{
    let started = Instant::now();
    let result = with_timeout(duration, future).await;
    log_database_operation(query_type, table, started.elapsed().as_millis() as u64);
    result
}

/// Log a database operation, warning when it is slow
pub fn log_database_operation(query_type: &str, table: &str, duration_ms: u64) {
    log::debug!("Database operation: {} {} ({}ms)", query_type, table, duration_ms);

    if duration_ms > SLOW_QUERY_THRESHOLD_MS {
        log::warn!(
            "Slow database query detected: {} {} took {}ms",
            query_type,
            table,
            duration_ms
        );
    }
}
