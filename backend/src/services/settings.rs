//! Per-user weather settings
//!
//! Holds the location the forecast is fetched for and the SMS notification
//! preference. The pipeline reads these instead of any ambient UI state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Settings service for managing weather preferences
#[derive(Clone)]
pub struct SettingsService {
    db: PgPool,
}

/// Weather settings for one user
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeatherSettings {
    pub user_id: Uuid,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone_number: Option<String>,
    pub sms_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// Input for updating weather settings
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSettingsInput {
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[validate(length(min = 4, max = 20))]
    pub phone_number: Option<String>,
    pub sms_enabled: Option<bool>,
}

impl SettingsService {
    /// Create a new SettingsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get weather settings for a user
    pub async fn get_settings(&self, user_id: Uuid) -> AppResult<WeatherSettings> {
        let settings = sqlx::query_as::<_, WeatherSettings>(
            r#"
            SELECT user_id, city, latitude, longitude, phone_number, sms_enabled, updated_at
            FROM weather_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Weather settings".to_string()))?;

        Ok(settings)
    }

    /// Create or update weather settings for a user
    pub async fn upsert_settings(
        &self,
        user_id: Uuid,
        input: UpdateSettingsInput,
    ) -> AppResult<WeatherSettings> {
        let settings = sqlx::query_as::<_, WeatherSettings>(
            r#"
            INSERT INTO weather_settings (user_id, city, latitude, longitude, phone_number, sms_enabled)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, false))
            ON CONFLICT (user_id) DO UPDATE SET
                city = COALESCE($2, weather_settings.city),
                latitude = COALESCE($3, weather_settings.latitude),
                longitude = COALESCE($4, weather_settings.longitude),
                phone_number = COALESCE($5, weather_settings.phone_number),
                sms_enabled = COALESCE($6, weather_settings.sms_enabled),
                updated_at = NOW()
            RETURNING user_id, city, latitude, longitude, phone_number, sms_enabled, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&input.city)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(&input.phone_number)
        .bind(input.sms_enabled)
        .fetch_one(&self.db)
        .await?;

        Ok(settings)
    }

    /// List settings for every user, for the background refresh sweep
    pub async fn list_all_settings(&self) -> AppResult<Vec<WeatherSettings>> {
        let settings = sqlx::query_as::<_, WeatherSettings>(
            r#"
            SELECT user_id, city, latitude, longitude, phone_number, sms_enabled, updated_at
            FROM weather_settings
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(settings)
    }
}
