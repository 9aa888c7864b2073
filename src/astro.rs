//! Day length and approximate lunar phase
//!
//! The moon phase is a low-precision linear estimate: lunar age is the time
//! since a reference new moon modulo a fixed 29.53-day synodic period, split
//! into eight equal arcs of about 3.7 days. Any implementation using the same
//! reference epoch and period agrees to within one arc.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::fmt;

/// Mean synodic month used by the estimate, in days
pub const SYNODIC_PERIOD_DAYS: f64 = 29.53;

/// Reference new moon: 2000-01-06 18:14 UTC
pub const REFERENCE_NEW_MOON_EPOCH: i64 = 947_182_440;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Elapsed daylight between sunrise and sunset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayLength {
    pub hours: i64,
    pub minutes: i64,
    /// Sunset was reported before sunrise; the duration is the absolute gap
    pub inverted: bool,
}

impl fmt::Display for DayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// Day length from sunrise and sunset epoch seconds.
///
/// If sunset precedes sunrise the absolute difference is used and the result
/// is flagged `inverted`.
#[must_use]
pub fn day_length(sunrise: i64, sunset: i64) -> DayLength {
    let seconds = sunset.saturating_sub(sunrise);
    let total = seconds.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    DayLength {
        hours: i64::try_from(hours).unwrap_or(i64::MAX),
        minutes: i64::try_from(minutes).unwrap_or(0),
        inverted: seconds < 0,
    }
}

/// Eight named phases, starting at new moon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoonPhase {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Position in the cycle, 0 (new) to 7 (waning crescent)
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::FullMoon => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }

    /// Phase for a lunar age in days; ages outside one cycle wrap around
    #[must_use]
    pub fn from_age(age_days: f64) -> Self {
        if !age_days.is_finite() {
            return MoonPhase::NewMoon;
        }
        let age = age_days.rem_euclid(SYNODIC_PERIOD_DAYS);
        let arc = (age / SYNODIC_PERIOD_DAYS * 8.0).floor();
        // arc is in [0, 8)
        Self::from_index(arc as usize)
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.name())
    }
}

/// Lunar age in days at an instant, in `[0, 29.53)`
#[must_use]
pub fn moon_age_at(instant: DateTime<Utc>) -> f64 {
    let elapsed = (instant.timestamp() - REFERENCE_NEW_MOON_EPOCH) as f64 / SECONDS_PER_DAY;
    elapsed.rem_euclid(SYNODIC_PERIOD_DAYS)
}

/// Lunar age in days at noon UTC of a calendar date
#[must_use]
pub fn moon_age_days(date: NaiveDate) -> f64 {
    moon_age_at(date.and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(12))
}

/// Approximate phase at an instant
#[must_use]
pub fn moon_phase_at(instant: DateTime<Utc>) -> MoonPhase {
    MoonPhase::from_age(moon_age_at(instant))
}

/// Approximate phase for a calendar date
#[must_use]
pub fn moon_phase(date: NaiveDate) -> MoonPhase {
    MoonPhase::from_age(moon_age_days(date))
}
