//! `WeatherDash` - weather dashboard core
//!
//! This library provides unit formatting, clothing/AQI/UV classification,
//! severe weather alerts, daily forecast aggregation, day length and moon
//! phase estimation, plus the OpenWeatherMap client that feeds them.

pub mod advisory;
pub mod alerts;
pub mod astro;
pub mod cache;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod logging;
pub mod models;
pub mod provider;
pub mod session;

// Re-export core types for public API
pub use advisory::{AqiBand, ClothingAdvice, Tier, UvBand, aqi_tier, clothing_suggestion, uv_tier};
pub use alerts::{Alert, AlertKind, AlertSeverity, evaluate_alerts};
pub use astro::{DayLength, MoonPhase, day_length, moon_age_days, moon_phase};
pub use client::OpenWeatherClient;
pub use config::WeatherDashConfig;
pub use dashboard::Dashboard;
pub use error::WeatherDashError;
pub use forecast::{DailyAggregate, ForecastLimits, aggregate_daily, aggregate_daily_in};
pub use models::{Condition, Location, Units, WeatherSample};
pub use session::{Session, Theme};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherDashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
