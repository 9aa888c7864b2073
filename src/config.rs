//! Configuration management for `WeatherDash`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherDashError;
use crate::forecast::{DEFAULT_FORECAST_DAYS, DEFAULT_HOURLY_SAMPLES, ForecastLimits};
use crate::models::Units;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Longest cache TTL accepted (one day)
const MAX_TTL_SECONDS: u64 = 86_400;
/// Largest forecast point count the provider returns (5 days of 3-hour steps)
const MAX_HOURLY_SAMPLES: usize = 40;
const MAX_FORECAST_DAYS: usize = 16;

/// Root configuration structure for the `WeatherDash` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherDashConfig {
    /// Weather provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default dashboard settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Weather provider configuration settings
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Base URL for the provider API
    #[serde(default = "default_provider_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u32,
}

// Keeps the key out of debug logs
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for current weather and forecast responses
    #[serde(default = "default_weather_ttl")]
    pub weather_ttl_seconds: u64,
    /// TTL for UV and air quality responses
    #[serde(default = "default_uv_ttl")]
    pub uv_ttl_seconds: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Default dashboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Unit system selector ("metric" or "imperial")
    #[serde(default)]
    pub units: Units,
    /// Cities offered before the user adds their own
    #[serde(default = "default_favorites")]
    pub favorites: Vec<String>,
    /// Initial theme ("light" or "dark")
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Number of forecast points in the hourly view
    #[serde(default = "default_hourly_samples")]
    pub hourly_samples: usize,
    /// Number of days in the daily view
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,
}

// Default value functions
fn default_provider_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_provider_timeout() -> u32 {
    10
}

fn default_weather_ttl() -> u64 {
    600
}

fn default_uv_ttl() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_favorites() -> Vec<String> {
    ["London", "New York", "Tokyo"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_hourly_samples() -> usize {
    DEFAULT_HOURLY_SAMPLES
}

fn default_forecast_days() -> usize {
    DEFAULT_FORECAST_DAYS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_provider_base_url(),
            timeout_seconds: default_provider_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            weather_ttl_seconds: default_weather_ttl(),
            uv_ttl_seconds: default_uv_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            units: Units::default(),
            favorites: default_favorites(),
            theme: default_theme(),
            hourly_samples: default_hourly_samples(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl ProviderConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.timeout_seconds))
    }
}

impl CacheConfig {
    #[must_use]
    pub fn weather_ttl(&self) -> Duration {
        Duration::from_secs(self.weather_ttl_seconds)
    }

    #[must_use]
    pub fn uv_ttl(&self) -> Duration {
        Duration::from_secs(self.uv_ttl_seconds)
    }
}

impl DefaultsConfig {
    #[must_use]
    pub fn forecast_limits(&self) -> ForecastLimits {
        ForecastLimits {
            hourly_samples: self.hourly_samples,
            days: self.forecast_days,
        }
    }
}

impl WeatherDashConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            tracing::debug!(path = %config_file.display(), "Loading configuration file");
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHERDASH_PROVIDER__API_KEY style overrides
        builder = builder.add_source(
            Environment::with_prefix("WEATHERDASH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherDashConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherdash").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.provider.base_url.is_empty() {
            self.provider.base_url = default_provider_base_url();
        }
        if self.provider.timeout_seconds == 0 {
            self.provider.timeout_seconds = default_provider_timeout();
        }
        if self.cache.weather_ttl_seconds == 0 {
            self.cache.weather_ttl_seconds = default_weather_ttl();
        }
        if self.cache.uv_ttl_seconds == 0 {
            self.cache.uv_ttl_seconds = default_uv_ttl();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.theme.is_empty() {
            self.defaults.theme = default_theme();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate the provider API key if one is configured
    pub fn validate_api_key(&self) -> Result<()> {
        if let Some(api_key) = &self.provider.api_key {
            if api_key.trim().is_empty() {
                return Err(WeatherDashError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }

            if api_key.len() < 8 {
                return Err(WeatherDashError::config(
                    "Weather API key appears to be invalid (too short). Please check your API key.",
                )
                .into());
            }

            if api_key.len() > 100 {
                return Err(WeatherDashError::config(
                    "Weather API key appears to be invalid (too long). Please check your API key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.provider.timeout_seconds > 120 {
            return Err(
                WeatherDashError::config("Weather API timeout cannot exceed 120 seconds").into(),
            );
        }

        if self.cache.weather_ttl_seconds > MAX_TTL_SECONDS
            || self.cache.uv_ttl_seconds > MAX_TTL_SECONDS
        {
            return Err(WeatherDashError::config("Cache TTL cannot exceed 86400 seconds (1 day)").into());
        }

        if self.defaults.hourly_samples == 0 || self.defaults.hourly_samples > MAX_HOURLY_SAMPLES {
            return Err(WeatherDashError::config(format!(
                "Hourly samples must be between 1 and {MAX_HOURLY_SAMPLES}"
            ))
            .into());
        }

        if self.defaults.forecast_days == 0 || self.defaults.forecast_days > MAX_FORECAST_DAYS {
            return Err(WeatherDashError::config(format!(
                "Forecast days must be between 1 and {MAX_FORECAST_DAYS}"
            ))
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherDashError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherDashError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_themes = ["light", "dark"];
        if !valid_themes.contains(&self.defaults.theme.as_str()) {
            return Err(WeatherDashError::config(format!(
                "Invalid theme '{}'. Must be one of: {}",
                self.defaults.theme,
                valid_themes.join(", ")
            ))
            .into());
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(WeatherDashError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = WeatherDashConfig::default();
        assert_eq!(config.provider.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.provider.timeout_seconds, 10);
        assert_eq!(config.cache.weather_ttl_seconds, 600);
        assert_eq!(config.cache.uv_ttl_seconds, 3600);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.units, Units::Metric);
        assert_eq!(config.defaults.favorites, vec!["London", "New York", "Tokyo"]);
        assert_eq!(config.defaults.forecast_limits(), ForecastLimits::default());
        assert!(config.provider.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_valid_api_key() {
        let mut config = WeatherDashConfig::default();
        config.provider.api_key = Some("valid_api_key_123".to_string());
        assert!(config.validate_api_key().is_ok());

        config.provider.api_key = Some("short".to_string());
        let err = config.validate_api_key().unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WeatherDashConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = WeatherDashConfig::default();
        config.provider.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("timeout cannot exceed"));

        let mut config = WeatherDashConfig::default();
        config.defaults.hourly_samples = 0;
        assert!(config.validate().is_err());

        let mut config = WeatherDashConfig::default();
        config.cache.uv_ttl_seconds = MAX_TTL_SECONDS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = WeatherDashConfig::default();
        config.provider.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = WeatherDashConfig::default();
        config.provider.api_key = Some("super_secret_key".to_string());
        let printed = format!("{config:?}");
        assert!(!printed.contains("super_secret_key"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("weatherdash-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[provider]\napi_key = \"abcdefgh1234\"\n\n[defaults]\nunits = \"imperial\"\nforecast_days = 5\n"
        )
        .unwrap();

        let config = WeatherDashConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.provider.api_key.as_deref(), Some("abcdefgh1234"));
        assert_eq!(config.defaults.units, Units::Imperial);
        assert_eq!(config.defaults.forecast_days, 5);
        assert_eq!(config.cache.weather_ttl_seconds, 600);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = WeatherDashConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("weatherdash"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
