//! Weather sample model

use super::{Condition, Units};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single observation or forecast point
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSample {
    /// Timestamp of this point
    pub timestamp: DateTime<Utc>,
    /// Temperature in the sample's measurement system
    pub temperature: f32,
    /// "Feels like" temperature
    pub feels_like: f32,
    /// Relative humidity in percent
    pub humidity: u8,
    /// Atmospheric pressure in hPa
    pub pressure: f32,
    /// Wind speed in the sample's measurement system
    pub wind_speed: f32,
    /// Wind direction in degrees (0-360, where 0/360 is North)
    pub wind_direction: u16,
    /// Primary condition
    pub condition: Condition,
    /// Provider description, e.g. "light rain"
    pub description: String,
    /// Precipitation probability (0.0-1.0)
    pub precipitation_probability: f32,
}

impl WeatherSample {
    /// Build a sample from an epoch-seconds timestamp. Timestamps outside the
    /// representable range clamp to the Unix epoch.
    #[must_use]
    pub fn at_epoch(epoch_seconds: i64) -> Self {
        Self {
            timestamp: DateTime::from_timestamp(epoch_seconds, 0).unwrap_or_default(),
            temperature: 0.0,
            feels_like: 0.0,
            humidity: 0,
            pressure: 0.0,
            wind_speed: 0.0,
            wind_direction: 0,
            condition: Condition::Unknown,
            description: String::new(),
            precipitation_probability: 0.0,
        }
    }

    /// Epoch seconds of this sample
    #[must_use]
    pub fn epoch_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Temperature in Celsius given the measurement system the sample was fetched in
    #[must_use]
    pub fn temperature_celsius(&self, units: Units) -> f32 {
        units.to_celsius(self.temperature)
    }

    /// Copy of this sample with temperatures in Celsius and wind in m/s
    #[must_use]
    pub fn to_metric(&self, units: Units) -> Self {
        Self {
            temperature: units.to_celsius(self.temperature),
            feels_like: units.to_celsius(self.feels_like),
            wind_speed: units.to_meters_per_second(self.wind_speed),
            ..self.clone()
        }
    }

    /// Capitalized provider description
    #[must_use]
    pub fn format_description(&self) -> String {
        let mut chars = self.description.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => self.condition.name().to_string(),
        }
    }

    /// Format atmospheric pressure with unit
    #[must_use]
    pub fn format_pressure(&self) -> String {
        format!("{:.0} hPa", self.pressure)
    }

    /// Precipitation probability as a whole percentage
    #[must_use]
    pub fn format_precipitation(&self) -> String {
        format!("{:.0}%", self.precipitation_probability * 100.0)
    }

    /// Convert wind direction from degrees to cardinal direction
    #[must_use]
    pub fn wind_direction_to_cardinal(degrees: u16) -> &'static str {
        match degrees {
            0..=11 | 349..=360 => "N",
            12..=33 => "NNE",
            34..=56 => "NE",
            57..=78 => "ENE",
            79..=101 => "E",
            102..=123 => "ESE",
            124..=146 => "SE",
            147..=168 => "SSE",
            169..=191 => "S",
            192..=213 => "SSW",
            214..=236 => "SW",
            237..=258 => "WSW",
            259..=281 => "W",
            282..=303 => "WNW",
            304..=326 => "NW",
            327..=348 => "NNW",
            _ => "Unknown",
        }
    }
}
