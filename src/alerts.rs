//! Severe weather alerts derived from a single snapshot

use crate::models::{Condition, WeatherSample};
use serde::Serialize;

/// Temperature below which a freezing warning is raised (°C)
pub const FREEZING_TEMPERATURE_C: f32 = 0.0;
/// Temperature above which an extreme heat alert is raised (°C)
pub const EXTREME_HEAT_C: f32 = 35.0;
/// Wind speed above which a high wind advisory is raised (m/s)
pub const HIGH_WIND_MS: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum AlertSeverity {
    Warning,
    Error,
}

/// Which rule produced an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertKind {
    Freezing,
    ExtremeHeat,
    HighWind,
    SevereCondition(Condition),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub icon: &'static str,
    pub message: String,
    pub severity: AlertSeverity,
}

/// Evaluate the alert rules against a metric sample (°C, m/s).
///
/// Rules are independent and always reported in the same order: freezing,
/// extreme heat, high wind, severe condition. Imperial samples must go
/// through [`WeatherSample::to_metric`] first.
#[must_use]
pub fn evaluate_alerts(sample: &WeatherSample) -> Vec<Alert> {
    let mut alerts = Vec::new();

    push_alert(&mut alerts, freezing_alert(sample.temperature));
    push_alert(&mut alerts, heat_alert(sample.temperature));
    push_alert(&mut alerts, wind_alert(sample.wind_speed));
    push_alert(&mut alerts, condition_alert(sample.condition));

    alerts
}

fn push_alert(alerts: &mut Vec<Alert>, alert: Option<Alert>) {
    if let Some(alert) = alert {
        alerts.push(alert);
    }
}

fn freezing_alert(temp_c: f32) -> Option<Alert> {
    (temp_c < FREEZING_TEMPERATURE_C).then(|| Alert {
        kind: AlertKind::Freezing,
        icon: "⚠️",
        message: "Freezing Temperature".to_string(),
        severity: AlertSeverity::Warning,
    })
}

fn heat_alert(temp_c: f32) -> Option<Alert> {
    (temp_c > EXTREME_HEAT_C).then(|| Alert {
        kind: AlertKind::ExtremeHeat,
        icon: "🔥",
        message: "Extreme Heat Warning".to_string(),
        severity: AlertSeverity::Error,
    })
}

fn wind_alert(wind_ms: f32) -> Option<Alert> {
    (wind_ms > HIGH_WIND_MS).then(|| Alert {
        kind: AlertKind::HighWind,
        icon: "💨",
        message: "High Wind Advisory".to_string(),
        severity: AlertSeverity::Warning,
    })
}

fn condition_alert(condition: Condition) -> Option<Alert> {
    condition.is_severe().then(|| Alert {
        kind: AlertKind::SevereCondition(condition),
        icon: "⛈️",
        message: format!("{condition} Alert"),
        severity: AlertSeverity::Error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Units;

    fn sample(temperature: f32, wind_speed: f32, condition: Condition) -> WeatherSample {
        WeatherSample {
            temperature,
            wind_speed,
            condition,
            ..WeatherSample::at_epoch(1_700_000_000)
        }
    }

    #[test]
    fn test_calm_weather_has_no_alerts() {
        assert!(evaluate_alerts(&sample(18.0, 3.0, Condition::Clouds)).is_empty());
    }

    #[test]
    fn test_snowy_freezing_wind() {
        let alerts = evaluate_alerts(&sample(-5.0, 12.0, Condition::Snow));
        let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AlertKind::Freezing,
                AlertKind::HighWind,
                AlertKind::SevereCondition(Condition::Snow)
            ]
        );
        assert_eq!(alerts[2].message, "Snow Alert");
        assert_eq!(alerts[2].severity, AlertSeverity::Error);
        assert!(!kinds.contains(&AlertKind::ExtremeHeat));
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let snapshot = sample(-5.0, 12.0, Condition::Snow);
        assert_eq!(evaluate_alerts(&snapshot), evaluate_alerts(&snapshot));
    }

    #[test]
    fn test_heat_and_thunderstorm() {
        let alerts = evaluate_alerts(&sample(36.0, 2.0, Condition::Thunderstorm));
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].message, "Extreme Heat Warning");
        assert_eq!(alerts[0].severity, AlertSeverity::Error);
        assert_eq!(alerts[1].message, "Thunderstorm Alert");
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert!(evaluate_alerts(&sample(0.0, 10.0, Condition::Clear)).is_empty());
        assert!(evaluate_alerts(&sample(35.0, 0.0, Condition::Clear)).is_empty());
    }

    #[test]
    fn test_imperial_wind_is_converted_before_evaluation() {
        // 68°F / 20 mph read as metric would trip heat and wind; converted it is 20°C / 8.9 m/s
        let imperial = sample(68.0, 20.0, Condition::Clear);
        assert_eq!(evaluate_alerts(&imperial).len(), 2);
        assert!(evaluate_alerts(&imperial.to_metric(Units::Imperial)).is_empty());

        let gale = sample(30.0, 30.0, Condition::Clear).to_metric(Units::Imperial);
        let kinds: Vec<AlertKind> = evaluate_alerts(&gale).iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::Freezing, AlertKind::HighWind]);
    }
}
