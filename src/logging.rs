//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::{AirCastError, Result};
use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber for the given logging settings
///
/// `RUST_LOG` takes precedence over the configured level. Fails instead of
/// panicking when a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AirCastError::config(format!("Invalid log filter '{}': {e}", config.level)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.pretty().try_init(),
    };

    installed.map_err(|e| AirCastError::config(format!("Failed to install logger: {e}")))?;
    tracing::debug!("Logging initialised at level {}", config.level);
    Ok(())
}
