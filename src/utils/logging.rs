//! Structured logging setup.
//!
//! The codec only emits `tracing` events; binaries and tests that want to see
//! them call [`init_logging`] once. `RUST_LOG` takes precedence over the
//! configured level.

use crate::config::LoggingConfig;
use crate::error::{constants, CodecError, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber according to `config`.
///
/// # Errors
/// Returns `CodecError::ConfigError` if a global subscriber is already set
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(config.log_level).into())
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed
        .map_err(|e| CodecError::ConfigError(format!("{}: {e}", constants::ERR_LOGGING_INIT)))?;

    info!(app = %config.app_name, level = %config.log_level, "logging initialised");
    Ok(())
}
