//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::{Result, WeatherDashError};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| WeatherDashError::general(format!("Failed to initialise logging: {e}")))?;
    tracing::debug!(level = %config.level, format = %config.format, "Logging initialised");
    Ok(())
}
