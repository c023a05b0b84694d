//! Weather alert derivation tests
//!
//! Tests for the irregular-condition rules including:
//! - Rule precedence (first match wins)
//! - Quiet observations never alert
//! - Evaluator purity

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use shared::evaluation::check_irregular_weather;
use shared::models::{Observation, WeatherCondition};

fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
}

fn observation(
    condition: WeatherCondition,
    description: &str,
    temperature: f64,
    wind: f64,
) -> Observation {
    Observation {
        timestamp: ts(),
        condition,
        description: description.to_string(),
        temperature_celsius: temperature,
        wind_speed_mps: wind,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// End-to-end scenario: heavy rain
    #[test]
    fn test_heavy_rain_scenario() {
        let obs = observation(WeatherCondition::Rain, "heavy intensity rain", 20.0, 3.0);
        assert_eq!(
            check_irregular_weather(&obs).as_deref(),
            Some("Heavy rain expected: heavy intensity rain")
        );
    }

    /// End-to-end scenario: clear sky produces no alert
    #[test]
    fn test_clear_sky_scenario() {
        let obs = observation(WeatherCondition::Clear, "clear sky", 22.0, 2.0);
        assert_eq!(check_irregular_weather(&obs), None);
    }

    /// End-to-end scenario: extreme wind under overcast skies
    #[test]
    fn test_extreme_wind_scenario() {
        let obs = observation(WeatherCondition::Clouds, "overcast", 18.0, 12.0);
        assert_eq!(
            check_irregular_weather(&obs).as_deref(),
            Some("Extreme wind expected: 12 m/s")
        );
    }

    /// Thunderstorm wins over a simultaneous heat threshold breach
    #[test]
    fn test_thunderstorm_precedence_over_heat() {
        let obs = observation(WeatherCondition::Thunderstorm, "thunderstorm", 40.0, 2.0);
        let message = check_irregular_weather(&obs).unwrap();
        assert!(message.contains("Thunderstorm expected"));
        assert!(!message.contains("High temperature"));
    }

    /// Heavy-rain check wins over a simultaneous wind threshold breach
    #[test]
    fn test_heavy_rain_precedence_over_wind() {
        let obs = observation(WeatherCondition::Rain, "heavy intensity rain", 20.0, 15.0);
        let message = check_irregular_weather(&obs).unwrap();
        assert!(message.contains("Heavy rain expected"));
        assert!(!message.contains("Extreme wind"));
    }

    /// Rain without "heavy" in the description falls through to thresholds
    #[test]
    fn test_moderate_rain_falls_through() {
        let calm = observation(WeatherCondition::Rain, "moderate rain", 20.0, 3.0);
        assert_eq!(check_irregular_weather(&calm), None);

        let windy = observation(WeatherCondition::Rain, "moderate rain", 20.0, 11.0);
        assert_eq!(
            check_irregular_weather(&windy).as_deref(),
            Some("Extreme wind expected: 11 m/s")
        );
    }

    /// Threshold comparisons are strict, not inclusive
    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(
            check_irregular_weather(&observation(WeatherCondition::Clear, "clear sky", 35.0, 10.0)),
            None
        );
        assert_eq!(
            check_irregular_weather(&observation(WeatherCondition::Clear, "clear sky", 5.0, 0.0)),
            None
        );
    }

    /// Unknown provider categories only trip the numeric thresholds
    #[test]
    fn test_unknown_category_uses_thresholds() {
        let obs = observation(WeatherCondition::Other("Squall".to_string()), "squalls", 20.0, 3.0);
        assert_eq!(check_irregular_weather(&obs), None);

        let cold = observation(WeatherCondition::Other("Mist".to_string()), "mist", 2.0, 3.0);
        assert_eq!(
            check_irregular_weather(&cold).as_deref(),
            Some("Low temperature expected: 2°C")
        );
    }

    /// Fractional provider values are reproduced without rounding
    #[test]
    fn test_numeric_formatting_preserves_provider_values() {
        let windy = observation(WeatherCondition::Clear, "clear sky", 20.0, 10.5);
        assert_eq!(
            check_irregular_weather(&windy).as_deref(),
            Some("Extreme wind expected: 10.5 m/s")
        );

        let hot = observation(WeatherCondition::Clear, "clear sky", 36.42, 2.0);
        assert_eq!(
            check_irregular_weather(&hot).as_deref(),
            Some("High temperature expected: 36.42°C")
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for temperatures in the quiet band [5, 35]
    fn quiet_temperature_strategy() -> impl Strategy<Value = f64> {
        (50i64..=350i64).prop_map(|n| n as f64 / 10.0)
    }

    /// Strategy for wind speeds in the quiet band [0, 10]
    fn quiet_wind_strategy() -> impl Strategy<Value = f64> {
        (0i64..=100i64).prop_map(|n| n as f64 / 10.0)
    }

    /// Strategy for any plausible temperature
    fn temperature_strategy() -> impl Strategy<Value = f64> {
        (-400i64..=500i64).prop_map(|n| n as f64 / 10.0)
    }

    /// Strategy for any plausible wind speed
    fn wind_strategy() -> impl Strategy<Value = f64> {
        (0i64..=300i64).prop_map(|n| n as f64 / 10.0)
    }

    /// Strategy for descriptions without the "heavy" substring
    fn calm_description_strategy() -> impl Strategy<Value = String> {
        "[a-z ]{0,20}".prop_filter("must not contain heavy", |s| !s.contains("heavy"))
    }

    /// Strategy for quiet condition categories
    fn quiet_condition_strategy() -> impl Strategy<Value = WeatherCondition> {
        prop_oneof![
            Just(WeatherCondition::Clear),
            Just(WeatherCondition::Clouds),
            Just(WeatherCondition::Rain),
            Just(WeatherCondition::Other("Mist".to_string())),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Thunderstorms always alert, whatever the numbers say
        #[test]
        fn prop_thunderstorm_always_alerts(
            temp in temperature_strategy(),
            wind in wind_strategy(),
            description in "[a-z ]{0,20}"
        ) {
            let obs = observation(WeatherCondition::Thunderstorm, &description, temp, wind);
            let message = check_irregular_weather(&obs);
            prop_assert!(message.is_some());
            prop_assert!(message.unwrap().contains("Thunderstorm expected"));
        }

        /// Snow always alerts
        #[test]
        fn prop_snow_always_alerts(
            temp in temperature_strategy(),
            wind in wind_strategy(),
            description in "[a-z ]{0,20}"
        ) {
            let obs = observation(WeatherCondition::Snow, &description, temp, wind);
            let message = check_irregular_weather(&obs);
            prop_assert!(message.is_some());
            prop_assert!(message.unwrap().contains("Snow expected"));
        }

        /// Quiet observations never alert
        #[test]
        fn prop_quiet_observation_never_alerts(
            condition in quiet_condition_strategy(),
            description in calm_description_strategy(),
            temp in quiet_temperature_strategy(),
            wind in quiet_wind_strategy()
        ) {
            let obs = observation(condition, &description, temp, wind);
            prop_assert_eq!(check_irregular_weather(&obs), None);
        }

        /// The evaluator is a pure function: same observation, same result
        #[test]
        fn prop_evaluation_is_idempotent(
            condition in quiet_condition_strategy(),
            description in "[a-z ]{0,20}",
            temp in temperature_strategy(),
            wind in wind_strategy()
        ) {
            let obs = observation(condition, &description, temp, wind);
            prop_assert_eq!(check_irregular_weather(&obs), check_irregular_weather(&obs));
        }

        /// Condition rules always win over the numeric thresholds
        #[test]
        fn prop_condition_rules_take_precedence(
            temp in temperature_strategy(),
            wind in wind_strategy()
        ) {
            let obs = observation(WeatherCondition::Thunderstorm, "thunderstorm", temp, wind);
            let message = check_irregular_weather(&obs).unwrap();
            prop_assert!(message.starts_with("Thunderstorm expected"));
        }

        /// Wind and temperature breaches outside a condition rule always alert
        #[test]
        fn prop_threshold_breach_alerts(
            description in calm_description_strategy(),
            temp in temperature_strategy(),
            wind in wind_strategy()
        ) {
            let obs = observation(WeatherCondition::Clear, &description, temp, wind);
            let expected = wind > 10.0 || temp > 35.0 || temp < 5.0;
            prop_assert_eq!(check_irregular_weather(&obs).is_some(), expected);
        }
    }
}
