//! Route definitions for the FarmLink backend

use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - weather and alerts
        .nest("/weather", weather_routes())
}

/// Weather routes (protected)
fn weather_routes() -> Router<AppState> {
    Router::new()
        // Forecast (from provider, no persistence)
        .route("/forecast", get(handlers::get_forecast))
        // On-demand refresh of the alert pipeline
        .route("/refresh", post(handlers::refresh_alerts))
        // Per-user settings
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        // Alerts
        .route(
            "/alerts",
            get(handlers::list_alerts).post(handlers::create_alert),
        )
        .route("/alerts/:alert_id/read", patch(handlers::mark_alert_read))
        .route("/alerts/:alert_id", delete(handlers::delete_alert))
        .route_layer(middleware::from_fn(auth_middleware))
}
