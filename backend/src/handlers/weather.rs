//! HTTP handlers for forecast and refresh endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::WeatherClient;
use crate::middleware::CurrentUser;
use crate::models::ForecastBatch;
use crate::services::alerts::WeatherAlert;
use crate::services::pipeline::AlertPipeline;
use crate::AppState;

/// Query parameters for a forecast fetch: a city name, or coordinates
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Fetch the forecast for a location without touching the alert store
pub async fn get_forecast(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<ForecastBatch>> {
    if state.config.weather.api_key.is_empty() {
        return Err(AppError::Configuration(
            "Weather API key not configured".to_string(),
        ));
    }

    let client = WeatherClient::with_base_url(
        state.config.weather.api_key.clone(),
        state.config.weather.api_endpoint.clone(),
    );

    let batch = if let Some(city) = query.city.as_deref() {
        client.get_forecast_by_city(city).await?
    } else if let (Some(lat), Some(lon)) = (query.latitude, query.longitude) {
        client.get_forecast_by_coords(lat, lon).await?
    } else {
        return Err(AppError::ValidationError(
            "Provide a city or latitude/longitude".to_string(),
        ));
    };

    Ok(Json(batch))
}

/// Run the refresh pipeline for the caller on demand
pub async fn refresh_alerts(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<WeatherAlert>>> {
    let pipeline = AlertPipeline::from_config(state.db, &state.config)?;
    let alerts = pipeline.run_refresh(current_user.0.user_id).await?;
    Ok(Json(alerts))
}
