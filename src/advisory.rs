//! Advisory classifiers
//!
//! Pure lookups from a single reading to a qualitative tier: what to wear for
//! a temperature, and the label/colour bands for air quality and UV index.
//! Every classifier is total; NaN readings land in the open-ended top band.

use crate::models::{Condition, Units};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplier from the provider's 1-5 air quality level to the 0-500 US AQI scale
pub const PROVIDER_AQI_SCALE: f32 = 50.0;

/// UV index at or above which sun protection is recommended
pub const SUN_PROTECTION_UV: f32 = 3.0;

/// Label and display colour for a classified reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tier {
    pub label: &'static str,
    pub color: &'static str,
}

/// Clothing recommendation tiers, coldest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClothingAdvice {
    HeavyWinterGear,
    WarmJacket,
    LightJacket,
    LightLayers,
    CasualWear,
    LightBreathable,
}

impl ClothingAdvice {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ClothingAdvice::HeavyWinterGear => "Heavy winter coat, gloves, scarf, and warm boots",
            ClothingAdvice::WarmJacket => "Warm jacket, long sleeves, and closed shoes",
            ClothingAdvice::LightJacket => "Light jacket or sweater recommended",
            ClothingAdvice::LightLayers => "Long sleeves or light layers",
            ClothingAdvice::CasualWear => "Comfortable casual wear",
            ClothingAdvice::LightBreathable => "Light, breathable clothing. Stay hydrated!",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            ClothingAdvice::HeavyWinterGear | ClothingAdvice::WarmJacket => "🧥",
            _ => "👕",
        }
    }
}

impl fmt::Display for ClothingAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon(), self.message())
    }
}

/// Clothing recommendation for a temperature in Celsius.
///
/// The condition is accepted so weather-specific advice can be added later;
/// the current bands depend on temperature alone.
#[must_use]
pub fn clothing_suggestion(temp_c: f32, _condition: Condition) -> ClothingAdvice {
    if temp_c < 0.0 {
        ClothingAdvice::HeavyWinterGear
    } else if temp_c < 10.0 {
        ClothingAdvice::WarmJacket
    } else if temp_c < 15.0 {
        ClothingAdvice::LightJacket
    } else if temp_c < 20.0 {
        ClothingAdvice::LightLayers
    } else if temp_c < 25.0 {
        ClothingAdvice::CasualWear
    } else {
        ClothingAdvice::LightBreathable
    }
}

/// Clothing recommendation for a temperature expressed in `units`.
/// Imperial readings are converted to Celsius before classification.
#[must_use]
pub fn clothing_suggestion_in(temperature: f32, units: Units, condition: Condition) -> ClothingAdvice {
    clothing_suggestion(units.to_celsius(temperature), condition)
}

/// Air quality bands on the US AQI scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AqiBand {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiBand {
    /// Band for an index already on the 0-500 scale. Upper bounds are inclusive.
    #[must_use]
    pub fn classify(aqi: f32) -> Self {
        if aqi <= 50.0 {
            AqiBand::Good
        } else if aqi <= 100.0 {
            AqiBand::Moderate
        } else if aqi <= 150.0 {
            AqiBand::UnhealthyForSensitiveGroups
        } else if aqi <= 200.0 {
            AqiBand::Unhealthy
        } else if aqi <= 300.0 {
            AqiBand::VeryUnhealthy
        } else {
            AqiBand::Hazardous
        }
    }

    #[must_use]
    pub fn tier(self) -> Tier {
        let (label, color) = match self {
            AqiBand::Good => ("Good", "#00e400"),
            AqiBand::Moderate => ("Moderate", "#ffff00"),
            AqiBand::UnhealthyForSensitiveGroups => ("Unhealthy for Sensitive Groups", "#ff7e00"),
            AqiBand::Unhealthy => ("Unhealthy", "#ff0000"),
            AqiBand::VeryUnhealthy => ("Very Unhealthy", "#8f3f97"),
            AqiBand::Hazardous => ("Hazardous", "#7e0023"),
        };
        Tier { label, color }
    }
}

/// Label and colour for a US AQI value
#[must_use]
pub fn aqi_tier(aqi: f32) -> Tier {
    AqiBand::classify(aqi).tier()
}

/// Rescale the provider's 1-5 air quality level onto the US AQI scale.
///
/// This is a coarse linear approximation, not a pollutant-based AQI.
#[must_use]
pub fn rescale_provider_aqi(level: u8) -> f32 {
    f32::from(level) * PROVIDER_AQI_SCALE
}

/// UV index bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UvBand {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvBand {
    /// Band for a UV index. Upper bounds are exclusive.
    #[must_use]
    pub fn classify(uvi: f32) -> Self {
        if uvi < 3.0 {
            UvBand::Low
        } else if uvi < 6.0 {
            UvBand::Moderate
        } else if uvi < 8.0 {
            UvBand::High
        } else if uvi < 11.0 {
            UvBand::VeryHigh
        } else {
            UvBand::Extreme
        }
    }

    #[must_use]
    pub fn tier(self) -> Tier {
        let (label, color) = match self {
            UvBand::Low => ("Low", "#3ea72d"),
            UvBand::Moderate => ("Moderate", "#fff300"),
            UvBand::High => ("High", "#f18b00"),
            UvBand::VeryHigh => ("Very High", "#e53210"),
            UvBand::Extreme => ("Extreme", "#b567a4"),
        };
        Tier { label, color }
    }
}

/// Label and colour for a UV index
#[must_use]
pub fn uv_tier(uvi: f32) -> Tier {
    UvBand::classify(uvi).tier()
}

/// Approximate UV index from the local hour of day.
///
/// The free provider tier has no UV endpoint, so the value peaks at noon
/// and is zero outside 06:00-18:00. It is not a measurement.
#[must_use]
pub fn synthesize_uv_index(hour: u32) -> f32 {
    if (6..=18).contains(&hour) {
        let distance_from_noon = hour.abs_diff(12) as f32;
        ((12.0 - distance_from_noon) * 0.8).clamp(0.0, 11.0)
    } else {
        0.0
    }
}

/// Sun protection hint for a UV index
#[must_use]
pub fn sun_protection_advice(uvi: f32) -> &'static str {
    if uvi >= SUN_PROTECTION_UV {
        "🕶️ Sun protection recommended"
    } else {
        "☀️ Sun protection optional"
    }
}
