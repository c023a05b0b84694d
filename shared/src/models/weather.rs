//! Weather data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Primary weather condition category as reported by the forecast provider.
///
/// Unknown categories are preserved verbatim in `Other` so nothing the
/// provider sends is lost on a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Other(String),
}

impl WeatherCondition {
    pub fn as_str(&self) -> &str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Clouds",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Other(raw) => raw,
        }
    }
}

impl From<&str> for WeatherCondition {
    fn from(raw: &str) -> Self {
        match raw {
            "Clear" => WeatherCondition::Clear,
            "Clouds" => WeatherCondition::Clouds,
            "Rain" => WeatherCondition::Rain,
            "Thunderstorm" => WeatherCondition::Thunderstorm,
            "Snow" => WeatherCondition::Snow,
            other => WeatherCondition::Other(other.to_string()),
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WeatherCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WeatherCondition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(WeatherCondition::from(raw.as_str()))
    }
}

/// One forecast sample for a location.
///
/// Temperature and wind speed stay `f64` so that message interpolation
/// reproduces the provider's numeric representation without extra rounding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub condition: WeatherCondition,
    pub description: String,
    pub temperature_celsius: f64,
    pub wind_speed_mps: f64,
}

/// The ordered sequence of observations returned by one forecast fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastBatch {
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub observations: Vec<Observation>,
}

/// A detected irregular condition, ready to be persisted as an alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertDraft {
    pub condition: WeatherCondition,
    pub description: String,
}
