//! Measurement system selection and display units

use serde::{Deserialize, Serialize};
use std::fmt;

const MPH_PER_MS: f32 = 2.236_936;

/// Measurement system used for provider queries and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Units {
    /// Celsius and metres per second
    #[default]
    Metric,
    /// Fahrenheit and miles per hour
    Imperial,
}

impl Units {
    /// Resolve a selector string. Anything unrecognised falls back to metric.
    #[must_use]
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim().to_ascii_lowercase().as_str() {
            "imperial" => Units::Imperial,
            _ => Units::Metric,
        }
    }

    /// Selector as sent to the provider (`units=` query parameter)
    #[must_use]
    pub fn selector(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Temperature unit symbol
    #[must_use]
    pub fn temperature_symbol(self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    /// Wind speed unit label
    #[must_use]
    pub fn speed_unit(self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    /// Resolve the measurement system a temperature symbol belongs to
    #[must_use]
    pub fn from_temperature_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "°C" => Some(Units::Metric),
            "°F" => Some(Units::Imperial),
            _ => None,
        }
    }

    /// Convert a temperature in this system to Celsius
    #[must_use]
    pub fn to_celsius(self, temperature: f32) -> f32 {
        match self {
            Units::Metric => temperature,
            Units::Imperial => fahrenheit_to_celsius(temperature),
        }
    }

    /// Convert a wind speed in this system to m/s
    #[must_use]
    pub fn to_meters_per_second(self, speed: f32) -> f32 {
        match self {
            Units::Metric => speed,
            Units::Imperial => speed / MPH_PER_MS,
        }
    }

    /// Format a temperature with one decimal and the unit symbol
    #[must_use]
    pub fn format_temperature(self, temperature: f32) -> String {
        format!("{:.1}{}", temperature, self.temperature_symbol())
    }

    /// Format a temperature rounded to whole degrees
    #[must_use]
    pub fn format_temperature_rounded(self, temperature: f32) -> String {
        format!("{:.0}{}", temperature, self.temperature_symbol())
    }

    /// Format a wind speed with its unit label
    #[must_use]
    pub fn format_speed(self, speed: f32) -> String {
        format!("{:.1} {}", speed, self.speed_unit())
    }
}

impl From<String> for Units {
    fn from(selector: String) -> Self {
        Units::from_selector(&selector)
    }
}

impl From<Units> for String {
    fn from(units: Units) -> Self {
        units.selector().to_string()
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Convert Fahrenheit to Celsius
#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f32) -> f32 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Convert Celsius to Fahrenheit
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Parse a displayed temperature such as `"21.5°C"` back into its value
/// and measurement system.
#[must_use]
pub fn parse_displayed_temperature(display: &str) -> Option<(f32, Units)> {
    let display = display.trim();
    let split = display.find('°')?;
    let (value, symbol) = display.split_at(split);
    let units = Units::from_temperature_symbol(symbol)?;
    let value = value.trim().parse::<f32>().ok()?;
    Some((value, units))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_labels() {
        assert_eq!(Units::Metric.temperature_symbol(), "°C");
        assert_eq!(Units::Metric.speed_unit(), "m/s");
        assert_eq!(Units::Imperial.temperature_symbol(), "°F");
        assert_eq!(Units::Imperial.speed_unit(), "mph");
    }

    #[test]
    fn test_unknown_selector_falls_back_to_metric() {
        assert_eq!(Units::from_selector("imperial"), Units::Imperial);
        assert_eq!(Units::from_selector(" Imperial "), Units::Imperial);
        assert_eq!(Units::from_selector("metric"), Units::Metric);
        assert_eq!(Units::from_selector("standard"), Units::Metric);
        assert_eq!(Units::from_selector(""), Units::Metric);
    }

    #[test]
    fn test_serde_uses_fallback() {
        let units: Units = serde_json::from_str("\"kelvin\"").unwrap();
        assert_eq!(units, Units::Metric);
        assert_eq!(serde_json::to_string(&Units::Imperial).unwrap(), "\"imperial\"");
    }

    #[test]
    fn test_temperature_conversion() {
        assert!((fahrenheit_to_celsius(32.0)).abs() < 1e-5);
        assert!((fahrenheit_to_celsius(212.0) - 100.0).abs() < 1e-4);
        assert!((celsius_to_fahrenheit(-40.0) + 40.0).abs() < 1e-4);
        assert!((Units::Imperial.to_celsius(50.0) - 10.0).abs() < 1e-4);
        assert_eq!(Units::Metric.to_celsius(50.0), 50.0);
    }

    #[test]
    fn test_speed_conversion() {
        assert!((Units::Imperial.to_meters_per_second(22.369_36) - 10.0).abs() < 1e-3);
        assert_eq!(Units::Metric.to_meters_per_second(10.0), 10.0);
    }

    #[test]
    fn test_displayed_temperature_round_trip() {
        for value in [-12.3_f32, 0.0, 7.5, 21.4, 38.9] {
            let shown = Units::Metric.format_temperature(value);
            let (parsed, units) = parse_displayed_temperature(&shown).unwrap();
            assert_eq!(units, Units::Metric);
            assert!((units.to_celsius(parsed) - value).abs() < 0.05);
        }
    }

    #[test]
    fn test_displayed_imperial_converts_back_to_celsius() {
        let shown = Units::Imperial.format_temperature(celsius_to_fahrenheit(20.0));
        assert_eq!(shown, "68.0°F");
        let (parsed, units) = parse_displayed_temperature(&shown).unwrap();
        assert!((units.to_celsius(parsed) - 20.0).abs() < 0.05);
    }

    #[test]
    fn test_parse_rejects_unknown_symbol() {
        assert!(parse_displayed_temperature("21.0°K").is_none());
        assert!(parse_displayed_temperature("21.0").is_none());
        assert!(parse_displayed_temperature("warm°C").is_none());
    }
}
