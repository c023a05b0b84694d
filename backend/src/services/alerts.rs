//! Alert store for persisted weather alerts
//!
//! Every alert belongs to exactly one user; mark-read and delete enforce
//! ownership, reporting a missing alert and a foreign alert differently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Alert store backed by Postgres
#[derive(Clone)]
pub struct AlertService {
    db: PgPool,
}

/// Persisted weather alert
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeatherAlert {
    pub id: Uuid,
    pub user_id: Uuid,
    pub city: String,
    pub condition: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Input for creating a weather alert
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAlertInput {
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,
    #[validate(length(min = 1, message = "condition must not be empty"))]
    pub condition: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Store a new alert; read starts false and the description is final
    pub async fn create_alert(
        &self,
        user_id: Uuid,
        input: CreateAlertInput,
    ) -> AppResult<WeatherAlert> {
        let alert = sqlx::query_as::<_, WeatherAlert>(
            r#"
            INSERT INTO weather_alerts (user_id, city, condition, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, city, condition, description, timestamp, read
            "#,
        )
        .bind(user_id)
        .bind(&input.city)
        .bind(&input.condition)
        .bind(&input.description)
        .fetch_one(&self.db)
        .await?;

        Ok(alert)
    }

    /// List all alerts for a user, newest first
    pub async fn list_alerts(&self, user_id: Uuid) -> AppResult<Vec<WeatherAlert>> {
        let alerts = sqlx::query_as::<_, WeatherAlert>(
            r#"
            SELECT id, user_id, city, condition, description, timestamp, read
            FROM weather_alerts
            WHERE user_id = $1
            ORDER BY timestamp DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(alerts)
    }

    /// Mark an alert as read
    ///
    /// The read flag is monotonic: repeat calls keep it true.
    pub async fn mark_read(&self, user_id: Uuid, alert_id: Uuid) -> AppResult<WeatherAlert> {
        self.get_owned_alert(user_id, alert_id).await?;

        let alert = sqlx::query_as::<_, WeatherAlert>(
            r#"
            UPDATE weather_alerts SET read = true
            WHERE id = $1
            RETURNING id, user_id, city, condition, description, timestamp, read
            "#,
        )
        .bind(alert_id)
        .fetch_one(&self.db)
        .await?;

        Ok(alert)
    }

    /// Delete an alert
    pub async fn delete_alert(&self, user_id: Uuid, alert_id: Uuid) -> AppResult<()> {
        self.get_owned_alert(user_id, alert_id).await?;

        sqlx::query("DELETE FROM weather_alerts WHERE id = $1")
            .bind(alert_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    /// Fetch an alert and verify ownership: unknown id is NotFound,
    /// someone else's alert is Forbidden.
    async fn get_owned_alert(&self, user_id: Uuid, alert_id: Uuid) -> AppResult<WeatherAlert> {
        let alert = sqlx::query_as::<_, WeatherAlert>(
            r#"
            SELECT id, user_id, city, condition, description, timestamp, read
            FROM weather_alerts
            WHERE id = $1
            "#,
        )
        .bind(alert_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Weather alert".to_string()))?;

        if alert.user_id != user_id {
            return Err(AppError::Forbidden(
                "Alert belongs to another user".to_string(),
            ));
        }

        Ok(alert)
    }
}
