//! External API integrations

pub mod sms;
pub mod weather;

pub use sms::SmsClient;
pub use weather::WeatherClient;
