//! Irregular-weather detection rules
//!
//! Pure functions: one observation in, an optional alert message out. The
//! caller owns persistence, notification dispatch, and anything stateful.

use crate::models::{AlertDraft, ForecastBatch, Observation, WeatherCondition};

/// Wind speed above which an observation is irregular (m/s, strict)
pub const EXTREME_WIND_MPS: f64 = 10.0;

/// Temperature above which an observation is irregular (°C, strict)
pub const HIGH_TEMPERATURE_CELSIUS: f64 = 35.0;

/// Temperature below which an observation is irregular (°C, strict)
pub const LOW_TEMPERATURE_CELSIUS: f64 = 5.0;

/// Check a single observation against the irregular-condition rules.
///
/// Rules are ordered and the first match wins:
/// 1. Rain with "heavy" in the provider description
/// 2. Thunderstorm
/// 3. Snow
/// 4. Wind speed above 10 m/s
/// 5. Temperature above 35°C
/// 6. Temperature below 5°C
pub fn check_irregular_weather(observation: &Observation) -> Option<String> {
    if observation.condition == WeatherCondition::Rain
        && observation.description.contains("heavy")
    {
        return Some(format!("Heavy rain expected: {}", observation.description));
    }

    if observation.condition == WeatherCondition::Thunderstorm {
        return Some(format!("Thunderstorm expected: {}", observation.description));
    }

    if observation.condition == WeatherCondition::Snow {
        return Some(format!("Snow expected: {}", observation.description));
    }

    if observation.wind_speed_mps > EXTREME_WIND_MPS {
        return Some(format!(
            "Extreme wind expected: {} m/s",
            observation.wind_speed_mps
        ));
    }

    if observation.temperature_celsius > HIGH_TEMPERATURE_CELSIUS {
        return Some(format!(
            "High temperature expected: {}°C",
            observation.temperature_celsius
        ));
    }

    if observation.temperature_celsius < LOW_TEMPERATURE_CELSIUS {
        return Some(format!(
            "Low temperature expected: {}°C",
            observation.temperature_celsius
        ));
    }

    None
}

/// Build the stored alert description for a triggered observation.
///
/// The observation timestamp is prepended so the alert reads as
/// "2024-06-01 12:00: Thunderstorm expected: ...". Generated once at
/// creation; never recomputed.
pub fn format_alert_description(observation: &Observation, message: &str) -> String {
    format!(
        "{}: {}",
        observation.timestamp.format("%Y-%m-%d %H:%M"),
        message
    )
}

/// Evaluate a forecast batch in provider order.
///
/// Each observation is checked independently; there is no state across
/// observations and no deduplication across batches, so re-evaluating an
/// unchanged forecast yields the same drafts again.
pub fn evaluate_batch(batch: &ForecastBatch) -> Vec<AlertDraft> {
    batch
        .observations
        .iter()
        .filter_map(|observation| {
            check_irregular_weather(observation).map(|message| AlertDraft {
                condition: observation.condition.clone(),
                description: format_alert_description(observation, &message),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    fn observation(
        condition: WeatherCondition,
        description: &str,
        temperature: f64,
        wind: f64,
    ) -> Observation {
        Observation {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            condition,
            description: description.to_string(),
            temperature_celsius: temperature,
            wind_speed_mps: wind,
        }
    }

    #[test]
    fn heavy_rain_triggers() {
        let obs = observation(WeatherCondition::Rain, "heavy intensity rain", 20.0, 3.0);
        assert_eq!(
            check_irregular_weather(&obs).as_deref(),
            Some("Heavy rain expected: heavy intensity rain")
        );
    }

    #[test]
    fn light_rain_does_not_trigger() {
        let obs = observation(WeatherCondition::Rain, "light rain", 20.0, 3.0);
        assert_eq!(check_irregular_weather(&obs), None);
    }

    #[test]
    fn heavy_match_is_case_sensitive() {
        // The substring comes straight from the provider; "Heavy" must not match.
        let obs = observation(WeatherCondition::Rain, "Heavy intensity rain", 20.0, 3.0);
        assert_eq!(check_irregular_weather(&obs), None);
    }

    #[test]
    fn thunderstorm_triggers() {
        let obs = observation(
            WeatherCondition::Thunderstorm,
            "thunderstorm with rain",
            22.0,
            4.0,
        );
        assert_eq!(
            check_irregular_weather(&obs).as_deref(),
            Some("Thunderstorm expected: thunderstorm with rain")
        );
    }

    #[test]
    fn snow_triggers() {
        let obs = observation(WeatherCondition::Snow, "light snow", 1.0, 2.0);
        assert_eq!(
            check_irregular_weather(&obs).as_deref(),
            Some("Snow expected: light snow")
        );
    }

    #[test]
    fn extreme_wind_triggers_strictly_above_threshold() {
        let at_threshold = observation(WeatherCondition::Clouds, "overcast", 18.0, 10.0);
        assert_eq!(check_irregular_weather(&at_threshold), None);

        let above = observation(WeatherCondition::Clouds, "overcast", 18.0, 12.0);
        assert_eq!(
            check_irregular_weather(&above).as_deref(),
            Some("Extreme wind expected: 12 m/s")
        );
    }

    #[test]
    fn temperature_bounds_are_strict() {
        let hot_boundary = observation(WeatherCondition::Clear, "clear sky", 35.0, 2.0);
        assert_eq!(check_irregular_weather(&hot_boundary), None);

        let hot = observation(WeatherCondition::Clear, "clear sky", 35.5, 2.0);
        assert_eq!(
            check_irregular_weather(&hot).as_deref(),
            Some("High temperature expected: 35.5°C")
        );

        let cold_boundary = observation(WeatherCondition::Clear, "clear sky", 5.0, 2.0);
        assert_eq!(check_irregular_weather(&cold_boundary), None);

        let cold = observation(WeatherCondition::Clear, "clear sky", 4.5, 2.0);
        assert_eq!(
            check_irregular_weather(&cold).as_deref(),
            Some("Low temperature expected: 4.5°C")
        );
    }

    #[test]
    fn condition_rules_win_over_thresholds() {
        // Thunderstorm at 40°C reports the thunderstorm, not the heat.
        let obs = observation(WeatherCondition::Thunderstorm, "thunderstorm", 40.0, 2.0);
        assert_eq!(
            check_irregular_weather(&obs).as_deref(),
            Some("Thunderstorm expected: thunderstorm")
        );
    }

    #[test]
    fn clear_sky_does_not_trigger() {
        let obs = observation(WeatherCondition::Clear, "clear sky", 22.0, 2.0);
        assert_eq!(check_irregular_weather(&obs), None);
    }

    #[test]
    fn description_includes_observation_timestamp() {
        let obs = observation(WeatherCondition::Snow, "light snow", 1.0, 2.0);
        let message = check_irregular_weather(&obs).unwrap();
        assert_eq!(
            format_alert_description(&obs, &message),
            "2024-06-01 12:00: Snow expected: light snow"
        );
    }

    #[test]
    fn batch_evaluation_keeps_only_triggered_observations() {
        let batch = ForecastBatch {
            location_name: "London".to_string(),
            latitude: 51.5,
            longitude: -0.12,
            observations: vec![
                observation(WeatherCondition::Clear, "clear sky", 22.0, 2.0),
                observation(WeatherCondition::Clouds, "overcast", 18.0, 12.0),
                observation(WeatherCondition::Clear, "few clouds", 20.0, 3.0),
            ],
        };

        let drafts = evaluate_batch(&batch);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].condition, WeatherCondition::Clouds);
        assert_eq!(
            drafts[0].description,
            "2024-06-01 12:00: Extreme wind expected: 12 m/s"
        );
    }
}
