//! Startup configuration and logging setup for the API binary

use mp_shared::config::{AppConfig, Environment, LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Loads the env files (if present) and builds the validated application config
///
/// Precedence is process environment, then the environment-specific file
/// (e.g. `.env.production`), then `.env`.
pub fn load() -> Result<AppConfig, ConfigError> {
    let environment = Environment::from_env();

    // Missing env files are normal outside development
    let _ = dotenvy::from_filename(environment.env_file());
    let _ = dotenvy::dotenv();

    let config = AppConfig::from_env();
    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Installs the global tracing subscriber
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(logging.colored)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
