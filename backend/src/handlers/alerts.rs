//! HTTP handlers for weather alert endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::alerts::{AlertService, CreateAlertInput, WeatherAlert};
use crate::AppState;

/// List the caller's weather alerts, newest first
pub async fn list_alerts(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<WeatherAlert>>> {
    let service = AlertService::new(state.db);
    let alerts = service.list_alerts(current_user.0.user_id).await?;
    Ok(Json(alerts))
}

/// Create a weather alert
pub async fn create_alert(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateAlertInput>,
) -> AppResult<Json<WeatherAlert>> {
    input
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = AlertService::new(state.db);
    let alert = service.create_alert(current_user.0.user_id, input).await?;
    Ok(Json(alert))
}

/// Mark an alert as read
pub async fn mark_alert_read(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(alert_id): Path<Uuid>,
) -> AppResult<Json<WeatherAlert>> {
    let service = AlertService::new(state.db);
    let alert = service.mark_read(current_user.0.user_id, alert_id).await?;
    Ok(Json(alert))
}

/// Delete an alert
pub async fn delete_alert(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(alert_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = AlertService::new(state.db);
    service
        .delete_alert(current_user.0.user_id, alert_id)
        .await?;
    Ok(Json(()))
}
