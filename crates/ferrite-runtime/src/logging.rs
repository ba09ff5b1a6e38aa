//! Logging setup using `tracing` and `tracing-subscriber`.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Initializes the global tracing subscriber from configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
/// Initializing twice is a no-op, so tests may call this freely.
pub fn init_from_config(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init();
}

/// Initializes logging with a bare directive string, for examples and
/// tests that have no config file.
pub fn init(directive: &str) {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(directive))
        .try_init();
}
