//! OpenWeatherMap HTTP client with response caching

use crate::cache::{CacheKey, TtlCache};
use crate::config::{CacheConfig, ProviderConfig};
use crate::models::{Location, Units};
use crate::provider::{self, AirQuality, CurrentConditions, ForecastBatch};
use crate::{Result, WeatherDashError};
use chrono::Timelike;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, instrument};

const CURRENT_ENDPOINT: &str = "weather";
const FORECAST_ENDPOINT: &str = "forecast";
const AIR_POLLUTION_ENDPOINT: &str = "air_pollution";

/// Client for the current weather, forecast and air pollution endpoints.
///
/// Raw response bodies are cached per endpoint and query so a repeated search
/// within the TTL never hits the network. Failed requests are not retried.
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    units: Units,
    weather_ttl: Duration,
    uv_ttl: Duration,
    cache: TtlCache<String>,
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .field("cached_responses", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
    /// Create a new client
    pub fn new(
        provider: &ProviderConfig,
        cache: &CacheConfig,
        api_key: impl Into<String>,
        units: Units,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(WeatherDashError::config(
                "No weather API key configured. Set WEATHERDASH_PROVIDER__API_KEY or pass --api-key.",
            ));
        }

        let client = Client::builder()
            .timeout(provider.timeout())
            .user_agent(concat!("WeatherDash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WeatherDashError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            units,
            weather_ttl: cache.weather_ttl(),
            uv_ttl: cache.uv_ttl(),
            cache: TtlCache::new(),
        })
    }

    #[must_use]
    pub fn units(&self) -> Units {
        self.units
    }

    /// Switch the unit system used for subsequent queries
    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    /// Current conditions for a city name
    #[instrument(skip(self))]
    pub async fn current_by_city(&mut self, city: &str) -> Result<CurrentConditions> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherDashError::validation("City name cannot be empty"));
        }

        let params = vec![("q", city.to_string()), ("units", self.units.selector().to_string())];
        let body = self.fetch(CURRENT_ENDPOINT, params, self.weather_ttl).await?;
        let current = provider::parse_current(&body)?;
        info!(
            "Current weather for {}: {}",
            current.location.display_name(),
            current.sample.condition
        );
        Ok(current)
    }

    /// Current conditions at coordinates, used for "my location" lookups
    #[instrument(skip(self))]
    pub async fn current_by_coordinates(
        &mut self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions> {
        let params = self.coordinate_params(latitude, longitude, true);
        let body = self.fetch(CURRENT_ENDPOINT, params, self.weather_ttl).await?;
        provider::parse_current(&body)
    }

    /// 5-day / 3-hour forecast for a location
    #[instrument(skip(self, location), fields(location = %location.name))]
    pub async fn forecast(&mut self, location: &Location) -> Result<ForecastBatch> {
        let params = self.coordinate_params(location.latitude, location.longitude, true);
        let body = self.fetch(FORECAST_ENDPOINT, params, self.weather_ttl).await?;
        let batch = provider::parse_forecast(&body)?;
        debug!("Received {} forecast samples", batch.samples.len());
        Ok(batch)
    }

    /// Current air quality for a location
    #[instrument(skip(self, location), fields(location = %location.name))]
    pub async fn air_quality(&mut self, location: &Location) -> Result<AirQuality> {
        let params = self.coordinate_params(location.latitude, location.longitude, false);
        let body = self.fetch(AIR_POLLUTION_ENDPOINT, params, self.uv_ttl).await?;
        provider::parse_air_quality(&body)
    }

    /// UV index for the location's local hour of the observation.
    ///
    /// The free provider tier has no UV endpoint, so the value is synthesized.
    #[must_use]
    pub fn uv_index(&self, current: &CurrentConditions) -> f32 {
        let local = current.sample.timestamp.with_timezone(&current.utc_offset());
        crate::advisory::synthesize_uv_index(local.hour())
    }

    fn coordinate_params(
        &self,
        latitude: f64,
        longitude: f64,
        with_units: bool,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![("lat", format!("{latitude:.4}")), ("lon", format!("{longitude:.4}"))];
        if with_units {
            params.push(("units", self.units.selector().to_string()));
        }
        params
    }

    fn request_url(&self, endpoint: &str, params: &[(&'static str, String)]) -> String {
        let mut url = format!("{}/{}?", self.base_url, endpoint);
        for (name, value) in params {
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            url.push('&');
        }
        url.push_str("appid=");
        url.push_str(&urlencoding::encode(&self.api_key));
        url
    }

    async fn fetch(
        &mut self,
        endpoint: &'static str,
        params: Vec<(&'static str, String)>,
        ttl: Duration,
    ) -> Result<String> {
        let key = CacheKey::new(endpoint, params.iter().map(|(k, v)| (*k, v.as_str())));
        if let Some(body) = self.cache.get(&key) {
            return Ok(body);
        }

        let url = self.request_url(endpoint, &params);
        debug!("Requesting {} with {} parameters", endpoint, params.len());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherDashError::api(format!("Request to {endpoint} failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| WeatherDashError::api(format!("Failed to read {endpoint} response: {}", e.without_url())))?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        self.cache.put(key, body.clone(), ttl);
        Ok(body)
    }
}

fn status_error(status: StatusCode, body: &str) -> WeatherDashError {
    match status {
        StatusCode::UNAUTHORIZED => WeatherDashError::api("invalid API key"),
        StatusCode::NOT_FOUND => WeatherDashError::api("city not found"),
        _ => {
            let detail = provider::error_message(body).unwrap_or_else(|| status.to_string());
            WeatherDashError::api(format!("provider returned {}: {}", status.as_u16(), detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: &str = r#"{
        "coord": {"lon": 139.6917, "lat": 35.6895},
        "weather": [{"main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 21.3, "feels_like": 20.8, "pressure": 1016, "humidity": 40},
        "wind": {"speed": 2.1, "deg": 90},
        "dt": 1700000000,
        "sys": {"country": "JP", "sunrise": 1699995000, "sunset": 1700032000},
        "timezone": 32400,
        "name": "Tokyo"
    }"#;

    fn client() -> OpenWeatherClient {
        let provider = ProviderConfig {
            base_url: "http://127.0.0.1:9/data/2.5/".to_string(),
            ..ProviderConfig::default()
        };
        OpenWeatherClient::new(&provider, &CacheConfig::default(), "test_key_123", Units::Metric)
            .unwrap()
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let err = OpenWeatherClient::new(
            &ProviderConfig::default(),
            &CacheConfig::default(),
            "  ",
            Units::Metric,
        )
        .unwrap_err();
        assert!(matches!(err, WeatherDashError::Config { .. }));
    }

    #[test]
    fn test_request_url_encodes_params() {
        let client = client();
        let url = client.request_url(
            CURRENT_ENDPOINT,
            &[("q", "New York".to_string()), ("units", "metric".to_string())],
        );
        assert_eq!(
            url,
            "http://127.0.0.1:9/data/2.5/weather?q=New%20York&units=metric&appid=test_key_123"
        );
    }

    #[test]
    fn test_debug_omits_api_key() {
        assert!(!format!("{:?}", client()).contains("test_key_123"));
    }

    #[test]
    fn test_status_errors() {
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, "").to_string(),
            "API error: invalid API key"
        );
        assert_eq!(
            status_error(StatusCode::NOT_FOUND, "").to_string(),
            "API error: city not found"
        );
        let err = status_error(StatusCode::TOO_MANY_REQUESTS, r#"{"message": "slow down"}"#);
        assert!(err.to_string().contains("429: slow down"));
    }

    #[tokio::test]
    async fn test_cached_response_skips_network() {
        let mut client = client();
        let key = CacheKey::new(CURRENT_ENDPOINT, [("q", "Tokyo"), ("units", "metric")]);
        client.cache.put(key, CURRENT.to_string(), Duration::from_secs(60));

        let current = client.current_by_city("  Tokyo ").await.unwrap();
        assert_eq!(current.location.name, "Tokyo");
        assert_eq!(current.sample.temperature, 21.3);
        // 1700000000 is 22:13 UTC, 07:13 in Tokyo
        assert!((client.uv_index(&current) - 5.6).abs() < 1e-4);
    }

    #[tokio::test]
    async fn test_empty_city_is_rejected() {
        let err = client().current_by_city("   ").await.unwrap_err();
        assert!(matches!(err, WeatherDashError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_api_error() {
        let mut client = client();
        client.set_units(Units::Imperial);
        let err = client.current_by_city("Paris").await.unwrap_err();
        assert!(matches!(err, WeatherDashError::Api { .. }));
    }
}
