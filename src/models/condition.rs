//! Primary weather condition codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary condition reported for an observation or forecast point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Haze,
    #[default]
    Unknown,
}

impl Condition {
    /// Map the provider's condition group name (`weather[0].main`)
    #[must_use]
    pub fn from_provider(name: &str) -> Self {
        match name.trim() {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Rain" => Condition::Rain,
            "Drizzle" => Condition::Drizzle,
            "Thunderstorm" => Condition::Thunderstorm,
            "Snow" => Condition::Snow,
            "Mist" => Condition::Mist,
            "Fog" => Condition::Fog,
            "Haze" => Condition::Haze,
            _ => Condition::Unknown,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Rain => "Rain",
            Condition::Drizzle => "Drizzle",
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Snow => "Snow",
            Condition::Mist => "Mist",
            Condition::Fog => "Fog",
            Condition::Haze => "Haze",
            Condition::Unknown => "Unknown",
        }
    }

    /// Display glyph; unknown conditions get a thermometer
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Condition::Clear => "☀️",
            Condition::Clouds => "☁️",
            Condition::Rain => "🌧️",
            Condition::Drizzle => "🌦️",
            Condition::Thunderstorm => "⛈️",
            Condition::Snow => "❄️",
            Condition::Mist | Condition::Fog | Condition::Haze => "🌫️",
            Condition::Unknown => "🌡️",
        }
    }

    /// Conditions that raise a severe-weather alert
    #[must_use]
    pub fn is_severe(self) -> bool {
        matches!(self, Condition::Thunderstorm | Condition::Snow)
    }
}

impl From<String> for Condition {
    fn from(name: String) -> Self {
        Condition::from_provider(&name)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.name().to_string()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
