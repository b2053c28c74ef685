use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the weather provider API key.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Service-account credential file, relative to the working directory.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Diagnostic error log, relative to the working directory.
pub const ERROR_LOG_FILE: &str = "error_log.txt";

const DEFAULT_WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
const DEFAULT_CALENDAR_API: &str = "https://www.googleapis.com/calendar/v3";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory the config file was loaded from; not stored in the file
    #[serde(skip)]
    pub config_dir: PathBuf,

    /// Weather lookup settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Calendar sync settings
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Provider endpoint; `q` and `appid` are appended as query parameters
    #[serde(default = "default_weather_url")]
    pub base_url: String,

    /// Refresh interval in minutes
    #[serde(default = "default_refresh_minutes")]
    pub refresh_minutes: u32,
}

fn default_weather_url() -> String {
    DEFAULT_WEATHER_URL.to_string()
}

fn default_refresh_minutes() -> u32 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            refresh_minutes: default_refresh_minutes(),
        }
    }
}

impl WeatherConfig {
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.refresh_minutes) * 60)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Push each saved note to the remote calendar
    #[serde(default)]
    pub sync_enabled: bool,

    /// Calendar API root
    #[serde(default = "default_calendar_api")]
    pub api_base: String,
}

fn default_calendar_api() -> String {
    DEFAULT_CALENDAR_API.to_string()
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            sync_enabled: false,
            api_base: default_calendar_api(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wxnotes");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            calendar: CalendarConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, writing defaults there if missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let mut config = Self::default();
            if let Some(parent) = config_path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path)
            .context("Failed to read config file")?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
            .context("Failed to parse config file")?;

        if let Some(parent) = config_path.parent() {
            config.config_dir = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if self.weather.refresh_minutes == 0 {
            result.add_error(
                "weather.refresh_minutes",
                "Refresh interval must be greater than 0",
            );
        } else if self.weather.refresh_minutes > 1440 {
            result.add_warning(
                "weather.refresh_minutes",
                "Weather refresh interval is more than 24 hours",
            );
        }

        if let Ok(url) = Url::parse(&self.weather.base_url) {
            if url.scheme() == "http" {
                result.add_warning(
                    "weather.base_url",
                    "Weather provider is reached over plaintext HTTP",
                );
            }
        }

        if self.calendar.sync_enabled {
            self.validate_url(&self.calendar.api_base, "calendar.api_base", &mut result);

            if !Path::new(CREDENTIALS_FILE).exists() {
                result.add_warning(
                    "calendar.sync_enabled",
                    format!(
                        "Calendar sync enabled but {} was not found; every sync will fail",
                        CREDENTIALS_FILE
                    ),
                );
            }
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(config_path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("wxnotes");

        Ok(config_dir.join("config.toml"))
    }

    /// Resolve the weather API key from `.env` and the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingSetting` when the key is absent or blank.
    pub fn weather_api_key() -> Result<String, ConfigError> {
        // A missing .env file is fine; the variable may come from the shell.
        let _ = dotenvy::dotenv();
        api_key_from(std::env::var(API_KEY_ENV).ok())
    }
}

fn api_key_from(value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::MissingSetting(format!(
            "No API key found. Please set the {} environment variable.",
            API_KEY_ENV
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        // Default config should be valid (only warnings, no errors)
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_default_refresh_is_ten_minutes() {
        let config = Config::default();
        assert_eq!(config.weather.refresh_interval().as_millis(), 600_000);
    }

    #[test]
    fn test_plaintext_provider_is_warning() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.warnings.iter().any(|w| w.field == "weather.base_url"));
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.base_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_refresh_is_error() {
        let mut config = Config::default();
        config.weather.refresh_minutes = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.refresh_minutes"));
    }

    #[test]
    fn test_calendar_url_checked_only_when_sync_enabled() {
        let mut config = Config::default();
        config.calendar.api_base = "nope".to_string();
        assert!(config.validate().is_valid());

        config.calendar.sync_enabled = true;
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "calendar.api_base"));
    }

    #[test]
    fn test_load_from_writes_defaults_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wxnotes").join("config.toml");

        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.config_dir, dir.path().join("wxnotes"));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("config_dir"));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.config_dir, dir.path().join("wxnotes"));
        assert_eq!(loaded.weather.refresh_minutes, 10);
        assert!(!loaded.calendar.sync_enabled);
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[calendar]\nsync_enabled = true\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.config_dir, dir.path());
        assert!(config.calendar.sync_enabled);
        assert_eq!(config.calendar.api_base, DEFAULT_CALENDAR_API);
        assert_eq!(config.weather.base_url, DEFAULT_WEATHER_URL);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather\nrefresh_minutes = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_api_key_required() {
        assert!(matches!(api_key_from(None), Err(ConfigError::MissingSetting(_))));
        assert!(matches!(
            api_key_from(Some("   ".into())),
            Err(ConfigError::MissingSetting(_))
        ));
        assert_eq!(api_key_from(Some("abc123".into())).unwrap(), "abc123");
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
