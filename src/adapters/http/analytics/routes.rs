//! Axum router configuration for the aggregate views.

use axum::{routing::get, Router};

use super::handlers::{
    get_global_wrap, get_personal_analytics, get_profile_overview, AnalyticsAppState,
};

/// # Routes
/// - `GET /analytics` - Personal analytics
/// - `GET /profile` - Profile overview
/// - `GET /global-wrap` - Everyone's emotion distribution
pub fn analytics_routes() -> Router<AnalyticsAppState> {
    Router::new()
        .route("/analytics", get(get_personal_analytics))
        .route("/profile", get(get_profile_overview))
        .route("/global-wrap", get(get_global_wrap))
}
