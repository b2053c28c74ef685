pub mod config;
pub mod error;
pub mod error_log;

pub use config::{
    CalendarConfig, Config, ValidationResult, WeatherConfig, API_KEY_ENV, CREDENTIALS_FILE,
    ERROR_LOG_FILE,
};
pub use error::{ConfigError, InputError};
pub use error_log::ErrorLog;

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("wxnotes core initialized");
    Ok(())
}
