//! Forecast refresh pipeline
//!
//! Fetches a forecast batch, derives alerts from it, persists each hit, and
//! dispatches best-effort SMS notifications. One sink failure never aborts
//! the rest of the batch, and notification failures never reach the caller.

use shared::evaluation::evaluate_batch;
use shared::models::ForecastBatch;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::{SmsClient, WeatherClient};
use crate::services::alerts::{AlertService, CreateAlertInput, WeatherAlert};
use crate::services::settings::{SettingsService, WeatherSettings};

/// Where to send an out-of-band notification for persisted alerts
#[derive(Debug, Clone)]
pub struct NotifyTarget {
    pub phone_number: String,
}

/// Refresh pipeline wiring the provider, the alert store, and the SMS gateway
#[derive(Clone)]
pub struct AlertPipeline {
    weather: WeatherClient,
    alerts: AlertService,
    settings: SettingsService,
    sms: Option<SmsClient>,
}

impl AlertPipeline {
    /// Build the pipeline from configuration
    pub fn from_config(db: PgPool, config: &Config) -> AppResult<Self> {
        if config.weather.api_key.is_empty() {
            return Err(AppError::Configuration(
                "Weather API key not configured".to_string(),
            ));
        }

        Ok(Self {
            weather: WeatherClient::with_base_url(
                config.weather.api_key.clone(),
                config.weather.api_endpoint.clone(),
            ),
            alerts: AlertService::new(db.clone()),
            settings: SettingsService::new(db),
            sms: SmsClient::from_config(&config.sms.api_key, &config.sms.api_endpoint),
        })
    }

    /// Evaluate a forecast batch and persist every triggered alert.
    ///
    /// Observations are evaluated in provider order. Returns the alerts that
    /// made it into the store.
    pub async fn process_batch(
        &self,
        user_id: Uuid,
        batch: &ForecastBatch,
        notify: Option<&NotifyTarget>,
    ) -> Vec<WeatherAlert> {
        let mut created = Vec::new();

        for draft in evaluate_batch(batch) {
            let input = CreateAlertInput {
                city: batch.location_name.clone(),
                condition: draft.condition.to_string(),
                description: draft.description,
            };

            let alert = match self.alerts.create_alert(user_id, input).await {
                Ok(alert) => alert,
                Err(err) => {
                    tracing::warn!("Failed to store weather alert: {}", err);
                    continue;
                }
            };

            if let Some(target) = notify {
                self.dispatch_sms(target, &alert);
            }

            created.push(alert);
        }

        created
    }

    /// Fetch the forecast for one user's configured location and process it.
    ///
    /// A provider failure surfaces as a typed error and stores nothing; the
    /// next scheduled tick is the only retry.
    pub async fn run_refresh(&self, user_id: Uuid) -> AppResult<Vec<WeatherAlert>> {
        let settings = self.settings.get_settings(user_id).await?;
        let batch = self.fetch_forecast(&settings).await?;

        let target = notify_target(&settings);
        Ok(self
            .process_batch(user_id, &batch, target.as_ref())
            .await)
    }

    /// Fetch the forecast for a user's settings: location string first,
    /// coordinates as fallback.
    pub async fn fetch_forecast(&self, settings: &WeatherSettings) -> AppResult<ForecastBatch> {
        if let Some(city) = settings.city.as_deref() {
            return self.weather.get_forecast_by_city(city).await;
        }

        if let (Some(lat), Some(lon)) = (settings.latitude, settings.longitude) {
            return self.weather.get_forecast_by_coords(lat, lon).await;
        }

        Err(AppError::ValidationError(
            "No location configured for weather refresh".to_string(),
        ))
    }

    /// Best-effort SMS dispatch, after the alert is already persisted
    fn dispatch_sms(&self, target: &NotifyTarget, alert: &WeatherAlert) {
        let Some(sms) = self.sms.clone() else {
            return;
        };

        let phone_number = target.phone_number.clone();
        let city = alert.city.clone();
        let description = alert.description.clone();

        tokio::spawn(async move {
            if let Err(err) = sms.send_sms(&phone_number, &city, &description).await {
                tracing::warn!("SMS notification failed for {}: {}", city, err);
            }
        });
    }

    /// Run the refresh for every user with settings; per-user failures are
    /// logged and the sweep continues.
    pub async fn refresh_all_users(&self) {
        let all_settings = match self.settings.list_all_settings().await {
            Ok(settings) => settings,
            Err(err) => {
                tracing::error!("Failed to load weather settings for refresh: {}", err);
                return;
            }
        };

        for settings in all_settings {
            match self.run_refresh(settings.user_id).await {
                Ok(alerts) if !alerts.is_empty() => {
                    tracing::info!(
                        "Stored {} weather alert(s) for user {}",
                        alerts.len(),
                        settings.user_id
                    );
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(
                        "Weather refresh failed for user {}: {}",
                        settings.user_id,
                        err
                    );
                }
            }
        }
    }
}

/// Build the notification target from settings: enabled toggle plus a
/// configured destination, both required.
pub fn notify_target(settings: &WeatherSettings) -> Option<NotifyTarget> {
    if !settings.sms_enabled {
        return None;
    }

    settings
        .phone_number
        .as_ref()
        .filter(|number| !number.is_empty())
        .map(|number| NotifyTarget {
            phone_number: number.clone(),
        })
}

/// Spawn the periodic refresh task
pub fn spawn_scheduler(pipeline: AlertPipeline, interval_minutes: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_minutes * 60));

        loop {
            interval.tick().await;
            tracing::debug!("Running scheduled weather refresh");
            pipeline.refresh_all_users().await;
        }
    });
}
