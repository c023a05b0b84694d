//! Business logic services for the FarmLink backend

pub mod alerts;
pub mod pipeline;
pub mod settings;

pub use alerts::AlertService;
pub use pipeline::AlertPipeline;
pub use settings::SettingsService;
