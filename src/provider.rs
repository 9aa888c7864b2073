//! OpenWeatherMap response parsing
//!
//! Provider payloads are deserialized into the schema types below and then
//! converted into [`WeatherSample`] values before any classifier sees them,
//! so schema drift stays inside this module.

use crate::advisory::rescale_provider_aqi;
use crate::models::{Condition, Location, WeatherSample};
use crate::{Result, WeatherDashError};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for a searched location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub location: Location,
    pub sample: WeatherSample,
    /// Sunrise in epoch seconds, absent for some polar locations
    pub sunrise: Option<i64>,
    /// Sunset in epoch seconds
    pub sunset: Option<i64>,
    /// Provider icon code, e.g. "10d"
    pub icon_code: Option<String>,
    /// Location offset from UTC in seconds
    pub utc_offset_seconds: i32,
}

impl CurrentConditions {
    /// Provider icon URL at 4x size
    #[must_use]
    pub fn icon_url(&self) -> Option<String> {
        self.icon_code
            .as_ref()
            .map(|code| format!("https://openweathermap.org/img/wn/{code}@4x.png"))
    }

    /// UTC offset of the searched location
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        offset_or_utc(self.utc_offset_seconds)
    }
}

/// 3-hour forecast points for a location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastBatch {
    pub location: Option<Location>,
    pub samples: Vec<WeatherSample>,
    pub utc_offset_seconds: i32,
}

impl ForecastBatch {
    /// UTC offset of the forecast city
    #[must_use]
    pub fn utc_offset(&self) -> FixedOffset {
        offset_or_utc(self.utc_offset_seconds)
    }
}

/// Air quality reading with the index rescaled to the US AQI range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQuality {
    /// Provider level, 1 (good) to 5 (very poor)
    pub provider_level: u8,
    /// Approximate US AQI (`provider_level` x 50)
    pub index: f32,
    pub pm2_5: f32,
    pub pm10: f32,
    pub o3: f32,
}

fn offset_or_utc(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

/// Parse a current-weather response
pub fn parse_current(body: &str) -> Result<CurrentConditions> {
    let response: schema::CurrentResponse = serde_json::from_str(body)?;
    let condition = response
        .weather
        .first()
        .ok_or_else(|| WeatherDashError::parse("current weather has no condition entry"))?;

    let sample = build_sample(
        response.dt,
        &response.main,
        &response.wind,
        condition,
        None,
    );
    let location = Location {
        latitude: response.coord.lat,
        longitude: response.coord.lon,
        name: response.name.clone(),
        country: response.sys.country.clone(),
    };

    Ok(CurrentConditions {
        location,
        sample,
        sunrise: response.sys.sunrise,
        sunset: response.sys.sunset,
        icon_code: condition.icon.clone(),
        utc_offset_seconds: response.timezone.unwrap_or(0),
    })
}

/// Parse a 5-day / 3-hour forecast response.
///
/// Points without a condition entry are skipped rather than failing the batch.
pub fn parse_forecast(body: &str) -> Result<ForecastBatch> {
    let response: schema::ForecastResponse = serde_json::from_str(body)?;

    let mut samples = Vec::with_capacity(response.list.len());
    for point in &response.list {
        match point.weather.first() {
            Some(condition) => samples.push(build_sample(
                point.dt,
                &point.main,
                &point.wind,
                condition,
                point.pop,
            )),
            None => tracing::warn!(dt = point.dt, "Skipping forecast point without condition"),
        }
    }

    let location = response.city.as_ref().map(|city| Location {
        latitude: city.coord.lat,
        longitude: city.coord.lon,
        name: city.name.clone(),
        country: city.country.clone(),
    });
    let utc_offset_seconds = response
        .city
        .as_ref()
        .and_then(|city| city.timezone)
        .unwrap_or(0);

    Ok(ForecastBatch {
        location,
        samples,
        utc_offset_seconds,
    })
}

/// Parse an air pollution response
pub fn parse_air_quality(body: &str) -> Result<AirQuality> {
    let response: schema::AirPollutionResponse = serde_json::from_str(body)?;
    let entry = response
        .list
        .first()
        .ok_or_else(|| WeatherDashError::parse("air pollution response has no entries"))?;

    let level = entry.main.aqi;
    let components = entry.components.clone().unwrap_or_default();
    Ok(AirQuality {
        provider_level: level,
        index: rescale_provider_aqi(level),
        pm2_5: components.pm2_5.unwrap_or(0.0),
        pm10: components.pm10.unwrap_or(0.0),
        o3: components.o3.unwrap_or(0.0),
    })
}

fn build_sample(
    dt: i64,
    main: &schema::MainBlock,
    wind: &schema::WindBlock,
    condition: &schema::ConditionEntry,
    pop: Option<f32>,
) -> WeatherSample {
    WeatherSample {
        temperature: main.temp,
        feels_like: main.feels_like.unwrap_or(main.temp),
        humidity: main.humidity.unwrap_or(0),
        pressure: main.pressure.unwrap_or(0.0),
        wind_speed: wind.speed,
        wind_direction: wind.deg.unwrap_or(0),
        condition: Condition::from_provider(&condition.main),
        description: condition.description.clone().unwrap_or_default(),
        precipitation_probability: pop.unwrap_or(0.0).clamp(0.0, 1.0),
        ..WeatherSample::at_epoch(dt)
    }
}

/// OpenWeatherMap JSON shapes (only the fields we read)
pub mod schema {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct Coord {
        pub lat: f64,
        pub lon: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ConditionEntry {
        pub main: String,
        pub description: Option<String>,
        pub icon: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainBlock {
        pub temp: f32,
        pub feels_like: Option<f32>,
        pub pressure: Option<f32>,
        pub humidity: Option<u8>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct WindBlock {
        #[serde(default)]
        pub speed: f32,
        pub deg: Option<u16>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct SysBlock {
        pub country: Option<String>,
        pub sunrise: Option<i64>,
        pub sunset: Option<i64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub coord: Coord,
        #[serde(default)]
        pub weather: Vec<ConditionEntry>,
        pub main: MainBlock,
        #[serde(default)]
        pub wind: WindBlock,
        pub dt: i64,
        #[serde(default)]
        pub sys: SysBlock,
        pub timezone: Option<i32>,
        #[serde(default)]
        pub name: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastPoint {
        pub dt: i64,
        pub main: MainBlock,
        #[serde(default)]
        pub weather: Vec<ConditionEntry>,
        #[serde(default)]
        pub wind: WindBlock,
        pub pop: Option<f32>,
    }

    #[derive(Debug, Deserialize)]
    pub struct City {
        #[serde(default)]
        pub name: String,
        pub coord: Coord,
        pub country: Option<String>,
        pub timezone: Option<i32>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        #[serde(default)]
        pub list: Vec<ForecastPoint>,
        pub city: Option<City>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AqiMain {
        pub aqi: u8,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct Components {
        pub pm2_5: Option<f32>,
        pub pm10: Option<f32>,
        pub o3: Option<f32>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AirPollutionEntry {
        pub main: AqiMain,
        pub components: Option<Components>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AirPollutionResponse {
        #[serde(default)]
        pub list: Vec<AirPollutionEntry>,
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract the provider's `message` field from an error body, if any
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok()?.message
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 601, "main": "Snow", "description": "snow", "icon": "13d"}],
        "main": {"temp": -5.0, "feels_like": -9.3, "pressure": 1008, "humidity": 91},
        "wind": {"speed": 12.0, "deg": 40},
        "dt": 1700000000,
        "sys": {"country": "GB", "sunrise": 1699975000, "sunset": 1700008000},
        "timezone": 0,
        "name": "London"
    }"#;

    #[test]
    fn test_parse_current() {
        let current = parse_current(CURRENT).unwrap();
        assert_eq!(current.location.name, "London");
        assert_eq!(current.location.country.as_deref(), Some("GB"));
        assert_eq!(current.sample.condition, Condition::Snow);
        assert_eq!(current.sample.temperature, -5.0);
        assert_eq!(current.sample.humidity, 91);
        assert_eq!(current.sample.wind_direction, 40);
        assert_eq!(current.sample.epoch_seconds(), 1_700_000_000);
        assert_eq!(current.sunrise, Some(1_699_975_000));
        assert_eq!(
            current.icon_url().as_deref(),
            Some("https://openweathermap.org/img/wn/13d@4x.png")
        );
    }

    #[test]
    fn test_parse_current_without_condition_fails() {
        let body = r#"{"coord": {"lon": 0, "lat": 0}, "weather": [],
            "main": {"temp": 1.0}, "dt": 0, "name": "Nowhere"}"#;
        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, WeatherDashError::Parse { .. }));
    }

    #[test]
    fn test_parse_current_malformed_json() {
        assert!(matches!(
            parse_current("{\"coord\":").unwrap_err(),
            WeatherDashError::Parse { .. }
        ));
    }

    #[test]
    fn test_parse_forecast() {
        let body = r#"{
            "cod": "200",
            "list": [
                {"dt": 1700000000, "main": {"temp": 4.0, "feels_like": 1.0, "pressure": 1012, "humidity": 80},
                 "weather": [{"main": "Rain", "description": "light rain"}], "wind": {"speed": 3.5, "deg": 200}, "pop": 0.64},
                {"dt": 1700010800, "main": {"temp": 6.5},
                 "weather": [], "wind": {"speed": 4.0}},
                {"dt": 1700021600, "main": {"temp": 7.0},
                 "weather": [{"main": "Tornado"}], "wind": {"speed": 5.0}}
            ],
            "city": {"name": "London", "coord": {"lat": 51.5085, "lon": -0.1257}, "country": "GB", "timezone": 3600}
        }"#;
        let batch = parse_forecast(body).unwrap();
        assert_eq!(batch.samples.len(), 2);
        assert!((batch.samples[0].precipitation_probability - 0.64).abs() < 1e-6);
        assert_eq!(batch.samples[0].description, "light rain");
        assert_eq!(batch.samples[1].condition, Condition::Unknown);
        assert_eq!(batch.samples[1].precipitation_probability, 0.0);
        assert_eq!(batch.samples[1].feels_like, 7.0);
        assert_eq!(batch.utc_offset_seconds, 3600);
        assert_eq!(batch.location.unwrap().name, "London");
    }

    #[test]
    fn test_parse_empty_forecast() {
        let batch = parse_forecast(r#"{"list": []}"#).unwrap();
        assert!(batch.samples.is_empty());
        assert!(batch.location.is_none());
    }

    #[test]
    fn test_parse_air_quality() {
        let body = r#"{"coord": {"lon": 0, "lat": 0}, "list": [
            {"dt": 1700000000, "main": {"aqi": 3},
             "components": {"co": 201.9, "pm2_5": 12.5, "pm10": 20.1, "o3": 68.7}}]}"#;
        let aq = parse_air_quality(body).unwrap();
        assert_eq!(aq.provider_level, 3);
        assert_eq!(aq.index, 150.0);
        assert!((aq.pm2_5 - 12.5).abs() < 1e-6);
        assert!((aq.o3 - 68.7).abs() < 1e-4);
    }

    #[test]
    fn test_parse_air_quality_defaults_missing_components() {
        let aq = parse_air_quality(r#"{"list": [{"main": {"aqi": 1}}]}"#).unwrap();
        assert_eq!(aq.index, 50.0);
        assert_eq!(aq.pm10, 0.0);
        assert!(parse_air_quality(r#"{"list": []}"#).is_err());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"cod": "404", "message": "city not found"}"#).as_deref(),
            Some("city not found")
        );
        assert!(error_message("not json").is_none());
    }
}
