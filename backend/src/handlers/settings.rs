//! HTTP handlers for weather settings endpoints

use axum::{extract::State, Json};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::settings::{SettingsService, UpdateSettingsInput, WeatherSettings};
use crate::AppState;

/// Get the caller's weather settings
pub async fn get_settings(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<WeatherSettings>> {
    let service = SettingsService::new(state.db);
    let settings = service.get_settings(current_user.0.user_id).await?;
    Ok(Json(settings))
}

/// Create or update the caller's weather settings
pub async fn update_settings(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<UpdateSettingsInput>,
) -> AppResult<Json<WeatherSettings>> {
    input
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = SettingsService::new(state.db);
    let settings = service
        .upsert_settings(current_user.0.user_id, input)
        .await?;
    Ok(Json(settings))
}
