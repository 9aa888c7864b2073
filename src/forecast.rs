//! Daily forecast aggregation
//!
//! Groups a flat, time-ordered list of 3-hour forecast samples into calendar
//! days and summarizes each day: temperature range, dominant condition, peak
//! precipitation probability and mean wind speed.

use crate::models::{Condition, Units, WeatherSample};
use chrono::{Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// Default number of hourly samples kept (8 x 3h = 24 hours)
pub const DEFAULT_HOURLY_SAMPLES: usize = 8;
/// Default number of days kept
pub const DEFAULT_FORECAST_DAYS: usize = 7;

/// How much of a forecast to retain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastLimits {
    pub hourly_samples: usize,
    pub days: usize,
}

impl Default for ForecastLimits {
    fn default() -> Self {
        Self {
            hourly_samples: DEFAULT_HOURLY_SAMPLES,
            days: DEFAULT_FORECAST_DAYS,
        }
    }
}

/// Summary of all samples sharing one calendar date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub min_temperature: f32,
    pub max_temperature: f32,
    /// Most frequent condition; ties go to the one seen first that day
    pub dominant_condition: Condition,
    pub max_precipitation_probability: f32,
    pub mean_wind_speed: f32,
    pub sample_count: usize,
}

impl DailyAggregate {
    /// Day label such as "Monday, March 04"
    #[must_use]
    pub fn day_label(&self) -> String {
        self.date.format("%A, %B %d").to_string()
    }

    /// One display row: label, icon, high, low, rain chance, mean wind
    #[must_use]
    pub fn format_row(&self, units: Units) -> String {
        format!(
            "{:<22} {}  High {}  Low {}  Rain {:.0}%  Wind {:.1} {}",
            self.day_label(),
            self.dominant_condition.icon(),
            units.format_temperature_rounded(self.max_temperature),
            units.format_temperature_rounded(self.min_temperature),
            self.max_precipitation_probability * 100.0,
            self.mean_wind_speed,
            units.speed_unit(),
        )
    }
}

/// Running totals for one day bucket
struct DayBucket {
    date: NaiveDate,
    min_temperature: f32,
    max_temperature: f32,
    /// Condition counts in first-seen order
    conditions: Vec<(Condition, usize)>,
    max_precipitation_probability: f32,
    wind_total: f32,
    sample_count: usize,
}

impl DayBucket {
    fn new(date: NaiveDate, first: &WeatherSample) -> Self {
        Self {
            date,
            min_temperature: first.temperature,
            max_temperature: first.temperature,
            conditions: Vec::new(),
            max_precipitation_probability: first.precipitation_probability,
            wind_total: 0.0,
            sample_count: 0,
        }
    }

    fn add(&mut self, sample: &WeatherSample) {
        self.min_temperature = self.min_temperature.min(sample.temperature);
        self.max_temperature = self.max_temperature.max(sample.temperature);
        self.max_precipitation_probability = self
            .max_precipitation_probability
            .max(sample.precipitation_probability);
        self.wind_total += sample.wind_speed;
        self.sample_count += 1;

        match self.conditions.iter_mut().find(|(c, _)| *c == sample.condition) {
            Some((_, count)) => *count += 1,
            None => self.conditions.push((sample.condition, 1)),
        }
    }

    fn dominant_condition(&self) -> Condition {
        let mut best: Option<(Condition, usize)> = None;
        for &(condition, count) in &self.conditions {
            // strict comparison keeps the earliest of tied conditions
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((condition, count));
            }
        }
        best.map_or(Condition::Unknown, |(condition, _)| condition)
    }

    fn finish(self) -> DailyAggregate {
        DailyAggregate {
            date: self.date,
            min_temperature: self.min_temperature,
            max_temperature: self.max_temperature,
            dominant_condition: self.dominant_condition(),
            max_precipitation_probability: self.max_precipitation_probability,
            mean_wind_speed: self.wind_total / self.sample_count.max(1) as f32,
            sample_count: self.sample_count,
        }
    }
}

/// Aggregate samples into days using the machine's local time zone.
///
/// An empty input yields an empty result.
#[must_use]
pub fn aggregate_daily(samples: &[WeatherSample], max_days: usize) -> Vec<DailyAggregate> {
    aggregate_daily_in(samples, &Local, max_days)
}

/// Aggregate samples into days as seen from the time zone `tz`.
///
/// Buckets are returned in ascending date order, truncated to `max_days`.
#[must_use]
pub fn aggregate_daily_in<Tz: TimeZone>(
    samples: &[WeatherSample],
    tz: &Tz,
    max_days: usize,
) -> Vec<DailyAggregate> {
    let mut buckets: Vec<DayBucket> = Vec::new();

    for sample in samples {
        let date = sample.timestamp.with_timezone(tz).date_naive();
        let bucket = match buckets.iter().position(|b| b.date == date) {
            Some(index) => &mut buckets[index],
            None => {
                buckets.push(DayBucket::new(date, sample));
                let last = buckets.len() - 1;
                &mut buckets[last]
            }
        };
        bucket.add(sample);
    }

    buckets.sort_by_key(|b| b.date);
    buckets.truncate(max_days);

    tracing::debug!(
        samples = samples.len(),
        days = buckets.len(),
        "Aggregated forecast into daily buckets"
    );

    buckets.into_iter().map(DayBucket::finish).collect()
}

/// The first `max_samples` forecast points (the next ~24 hours by default)
#[must_use]
pub fn hourly_window(samples: &[WeatherSample], max_samples: usize) -> &[WeatherSample] {
    &samples[..samples.len().min(max_samples)]
}

/// Local `HH:MM` label for a forecast point
#[must_use]
pub fn hour_label<Tz: TimeZone>(sample: &WeatherSample, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    sample.timestamp.with_timezone(tz).format("%H:%M").to_string()
}
