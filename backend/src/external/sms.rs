//! SMS gateway client for out-of-band alert delivery
//!
//! Delivery is strictly best-effort: callers log failures and never
//! propagate them into alert persistence.

use serde::{Deserialize, Serialize};

/// SMS gateway client
#[derive(Clone)]
pub struct SmsClient {
    api_key: String,
    endpoint: String,
    http_client: reqwest::Client,
}

/// SMS send request
#[derive(Debug, Serialize)]
struct SmsSendRequest {
    to: String,
    body: String,
}

/// SMS gateway response
#[derive(Debug, Deserialize)]
struct SmsApiResponse {
    #[serde(default)]
    message: Option<String>,
}

impl SmsClient {
    /// Create a new SMS client
    pub fn new(api_key: String, endpoint: String) -> Self {
        Self {
            api_key,
            endpoint,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create from configuration; `None` when the gateway is not configured
    pub fn from_config(api_key: &str, endpoint: &str) -> Option<Self> {
        if api_key.is_empty() || endpoint.is_empty() {
            return None;
        }
        Some(Self::new(api_key.to_string(), endpoint.to_string()))
    }

    /// Send a weather alert SMS to a phone number
    pub async fn send_sms(
        &self,
        phone_number: &str,
        city: &str,
        alert_message: &str,
    ) -> Result<(), String> {
        let request = SmsSendRequest {
            to: phone_number.to_string(),
            body: format!("Weather alert for {}: {}", city, alert_message),
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("Failed to send SMS: {}", e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let error: SmsApiResponse = response.json().await.unwrap_or(SmsApiResponse {
                message: Some("Unknown error".to_string()),
            });
            Err(error.message.unwrap_or_else(|| "Unknown error".to_string()))
        }
    }
}
