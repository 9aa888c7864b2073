//! Error types and handling for `WeatherDash`

use thiserror::Error;

/// Main error type for the `WeatherDash` crate
#[derive(Error, Debug)]
pub enum WeatherDashError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Weather provider communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Provider payload could not be turned into weather samples
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl WeatherDashError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherDashError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            WeatherDashError::Api { message } => {
                format!("Unable to fetch weather data: {message}")
            }
            WeatherDashError::Parse { .. } => {
                "The weather service returned data we could not read.".to_string()
            }
            WeatherDashError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherDashError::Cache { .. } => {
                "Cache operation failed. Try again in a moment.".to_string()
            }
            WeatherDashError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            WeatherDashError::General { message } => message.clone(),
        }
    }
}

impl From<serde_json::Error> for WeatherDashError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}
