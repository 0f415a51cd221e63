//! HTTP adapter for check-in endpoints.
//!
//! - `POST /api/check-ins` - Record a check-in (201, or 500 with the failure shape)
//! - `GET /api/check-in` - Emotion catalog plus the caller's recent check-ins

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::CheckInAppState;
pub use routes::check_in_routes;
