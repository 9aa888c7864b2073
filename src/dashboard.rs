//! Dashboard assembly and plain-text rendering
//!
//! [`Dashboard::build`] is pure: it takes already-fetched provider data and
//! runs every classifier over it. [`load`] does the fetching first.

use crate::advisory::{self, AqiBand, ClothingAdvice, Tier, UvBand};
use crate::alerts::{self, Alert};
use crate::astro::{self, DayLength, MoonPhase};
use crate::client::OpenWeatherClient;
use crate::forecast::{self, DailyAggregate, ForecastLimits};
use crate::models::{Location, Units, WeatherSample};
use crate::provider::{AirQuality, CurrentConditions, ForecastBatch};
use crate::Result;
use chrono::{DateTime, FixedOffset, Timelike};
use serde::Serialize;
use std::fmt::{self, Write as _};
use tracing::{info, warn};

/// One entry of the hourly strip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyEntry {
    /// Local `HH:MM`
    pub label: String,
    pub sample: WeatherSample,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityPanel {
    pub reading: AirQuality,
    pub band: AqiBand,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UvPanel {
    pub index: f32,
    pub band: UvBand,
    pub tier: Tier,
    pub advice: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SunTimes {
    /// Local `HH:MM`
    pub sunrise: String,
    /// Local `HH:MM`
    pub sunset: String,
    pub day_length: DayLength,
}

/// Location marker shown in place of an interactive map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub location: Location,
    pub marker: String,
}

impl MapMarker {
    #[must_use]
    pub fn new(location: &Location) -> Self {
        Self {
            marker: format!("📍 {} ({})", location.display_name(), location.format_coordinates()),
            location: location.clone(),
        }
    }
}

/// Everything the dashboard shows for one searched location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub units: Units,
    pub current: CurrentConditions,
    pub clothing: ClothingAdvice,
    pub alerts: Vec<Alert>,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyAggregate>,
    pub air_quality: Option<AirQualityPanel>,
    pub uv: UvPanel,
    pub sun: Option<SunTimes>,
    pub moon: MoonPhase,
    pub map: MapMarker,
}

impl Dashboard {
    /// Run every classifier over fetched data.
    ///
    /// `units` is the system the provider data was requested in. Alerts and
    /// clothing are evaluated on a metric copy of the current sample.
    #[must_use]
    pub fn build(
        current: CurrentConditions,
        batch: Option<&ForecastBatch>,
        air_quality: Option<AirQuality>,
        units: Units,
        limits: ForecastLimits,
    ) -> Self {
        let offset = current.utc_offset();
        let metric = current.sample.to_metric(units);
        let local_observation = current.sample.timestamp.with_timezone(&offset);

        let clothing = advisory::clothing_suggestion(metric.temperature, metric.condition);
        let alerts = alerts::evaluate_alerts(&metric);

        let samples = batch.map_or(&[][..], |batch| batch.samples.as_slice());
        let hourly = forecast::hourly_window(samples, limits.hourly_samples)
            .iter()
            .map(|sample| HourlyEntry {
                label: forecast::hour_label(sample, &offset),
                sample: sample.clone(),
            })
            .collect();
        let daily = forecast::aggregate_daily_in(samples, &offset, limits.days);

        let air_quality = air_quality.map(|reading| {
            let band = AqiBand::classify(reading.index);
            AirQualityPanel {
                tier: band.tier(),
                band,
                reading,
            }
        });

        let uv_index = advisory::synthesize_uv_index(local_observation.hour());
        let uv_band = UvBand::classify(uv_index);
        let uv = UvPanel {
            index: uv_index,
            band: uv_band,
            tier: uv_band.tier(),
            advice: advisory::sun_protection_advice(uv_index),
        };

        let sun = match (current.sunrise, current.sunset) {
            (Some(sunrise), Some(sunset)) => Some(SunTimes {
                sunrise: local_hh_mm(sunrise, offset),
                sunset: local_hh_mm(sunset, offset),
                day_length: astro::day_length(sunrise, sunset),
            }),
            _ => None,
        };

        let moon = astro::moon_phase(local_observation.date_naive());
        let map = MapMarker::new(&current.location);

        Self {
            units,
            current,
            clothing,
            alerts,
            hourly,
            daily,
            air_quality,
            uv,
            sun,
            moon,
            map,
        }
    }

    /// Plain-text rendering used by the CLI
    #[must_use]
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

fn local_hh_mm(epoch_seconds: i64, offset: FixedOffset) -> String {
    DateTime::from_timestamp(epoch_seconds, 0).map_or_else(
        || "--:--".to_string(),
        |instant| instant.with_timezone(&offset).format("%H:%M").to_string(),
    )
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.units;
        let sample = &self.current.sample;
        let mut out = String::new();

        writeln!(out, "{}", self.current.location.display_name())?;
        writeln!(
            out,
            "{} {}  {}",
            sample.condition.icon(),
            units.format_temperature(sample.temperature),
            sample.format_description()
        )?;
        writeln!(
            out,
            "Feels like {}  Humidity {}%  Wind {} {}  Pressure {}",
            units.format_temperature(sample.feels_like),
            sample.humidity,
            units.format_speed(sample.wind_speed),
            WeatherSample::wind_direction_to_cardinal(sample.wind_direction),
            sample.format_pressure()
        )?;
        writeln!(out, "{}", self.clothing)?;

        for alert in &self.alerts {
            writeln!(out, "{} {}", alert.icon, alert.message)?;
        }

        if let Some(aq) = &self.air_quality {
            writeln!(
                out,
                "Air quality: {:.0} ({})  PM2.5 {:.1}  PM10 {:.1}  O3 {:.1}",
                aq.reading.index, aq.tier.label, aq.reading.pm2_5, aq.reading.pm10, aq.reading.o3
            )?;
        }
        writeln!(out, "UV index: {:.1} ({})  {}", self.uv.index, self.uv.tier.label, self.uv.advice)?;

        if let Some(sun) = &self.sun {
            writeln!(
                out,
                "Sunrise {}  Sunset {}  Day length {}",
                sun.sunrise, sun.sunset, sun.day_length
            )?;
        }
        writeln!(out, "Moon: {}", self.moon)?;
        writeln!(out, "{}", self.map.marker)?;

        if !self.hourly.is_empty() {
            writeln!(out)?;
            writeln!(out, "Hourly")?;
            for entry in &self.hourly {
                writeln!(
                    out,
                    "  {}  {} {}  {}",
                    entry.label,
                    entry.sample.condition.icon(),
                    units.format_temperature_rounded(entry.sample.temperature),
                    entry.sample.format_precipitation()
                )?;
            }
        }

        if !self.daily.is_empty() {
            writeln!(out)?;
            writeln!(out, "Daily")?;
            for day in &self.daily {
                writeln!(out, "  {}", day.format_row(units))?;
            }
        }

        f.write_str(out.trim_end())
    }
}

/// Fetch everything for a city and assemble the dashboard.
///
/// Only the current conditions are required. A failed forecast or air
/// quality request is logged and the panel left empty.
pub async fn load(
    client: &mut OpenWeatherClient,
    city: &str,
    limits: ForecastLimits,
) -> Result<Dashboard> {
    let current = client.current_by_city(city).await?;
    let location = current.location.clone();

    let forecast = match client.forecast(&location).await {
        Ok(batch) => Some(batch),
        Err(e) => {
            warn!("Forecast unavailable for {}: {}", location.name, e);
            None
        }
    };
    let air_quality = match client.air_quality(&location).await {
        Ok(reading) => Some(reading),
        Err(e) => {
            warn!("Air quality unavailable for {}: {}", location.name, e);
            None
        }
    };

    let dashboard = Dashboard::build(current, forecast.as_ref(), air_quality, client.units(), limits);
    info!(
        "Built dashboard for {} with {} alerts and {} forecast days",
        location.display_name(),
        dashboard.alerts.len(),
        dashboard.daily.len()
    );
    Ok(dashboard)
}
