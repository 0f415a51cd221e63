//! Axum router configuration for check-in endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_check_in_view, record_check_in, CheckInAppState};

/// # Routes
/// - `POST /check-ins` - Record a check-in
/// - `GET /check-in` - Check-in page view
pub fn check_in_routes() -> Router<CheckInAppState> {
    Router::new()
        .route("/check-ins", post(record_check_in))
        .route("/check-in", get(get_check_in_view))
}
