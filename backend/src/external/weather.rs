//! Weather API client for fetching forecast data
//!
//! Integrates with the OpenWeatherMap 5-day/3-hour forecast API

use chrono::{DateTime, Utc};
use reqwest::Client;
use shared::models::{ForecastBatch, Observation, WeatherCondition};

use crate::error::{AppError, AppResult};

/// Number of 3-hour forecast entries requested per fetch
const FORECAST_ENTRIES: u8 = 17;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap forecast response
#[derive(Debug, serde::Deserialize)]
struct OwmForecastResponse {
    city: OwmCity,
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, serde::Deserialize)]
struct OwmCity {
    name: String,
    coord: OwmCoord,
}

#[derive(Debug, serde::Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, serde::Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
}

#[derive(Debug, serde::Deserialize)]
struct OwmMain {
    temp: f64,
}

#[derive(Debug, serde::Deserialize)]
struct OwmWeather {
    main: String,
    description: String,
}

#[derive(Debug, serde::Deserialize)]
struct OwmWind {
    speed: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
        }
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch the forecast for a city by name
    pub async fn get_forecast_by_city(&self, city: &str) -> AppResult<ForecastBatch> {
        let url = format!(
            "{}/forecast?q={}&appid={}&units=metric&cnt={}",
            self.base_url, city, self.api_key, FORECAST_ENTRIES
        );
        self.fetch_forecast(&url).await
    }

    /// Fetch the forecast for a location by GPS coordinates
    pub async fn get_forecast_by_coords(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<ForecastBatch> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric&cnt={}",
            self.base_url, latitude, longitude, self.api_key, FORECAST_ENTRIES
        );
        self.fetch_forecast(&url).await
    }

    async fn fetch_forecast(&self, url: &str) -> AppResult<ForecastBatch> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::WeatherProvider(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherProvider(format!("{} - {}", status, body)));
        }

        let data: OwmForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherProvider(format!("invalid response body: {}", e)))?;

        Ok(convert_forecast_response(data))
    }
}

/// Convert an OpenWeatherMap forecast response to our format
fn convert_forecast_response(data: OwmForecastResponse) -> ForecastBatch {
    let observations = data
        .list
        .into_iter()
        .map(|item| {
            let weather = item.weather.first();
            Observation {
                timestamp: DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now),
                condition: weather
                    .map(|w| WeatherCondition::from(w.main.as_str()))
                    .unwrap_or(WeatherCondition::Other(String::new())),
                description: weather.map(|w| w.description.clone()).unwrap_or_default(),
                temperature_celsius: item.main.temp,
                wind_speed_mps: item.wind.speed,
            }
        })
        .collect();

    ForecastBatch {
        location_name: data.city.name,
        latitude: data.city.coord.lat,
        longitude: data.city.coord.lon,
        observations,
    }
}
