//! Structured logging configuration.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging
///
/// Log levels are configurable via the `RUST_LOG` env var (default:
/// `warn,swiss_tournament=info`). Records emitted through the `log` facade
/// by the tournament library are captured as well.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,swiss_tournament=info,st_admin=info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Log how long an admin command took
///
/// # Arguments
///
/// * `command` - Command name
/// * `duration_ms` - Duration in milliseconds
pub fn log_command(command: &str, duration_ms: u64) {
    if duration_ms > 1000 {
        tracing::warn!(
            command = command,
            duration_ms = duration_ms,
            "PERFORMANCE: Slow command"
        );
    } else {
        tracing::debug!(
            command = command,
            duration_ms = duration_ms,
            "Command completed"
        );
    }
}
