//! HTTP adapter for the aggregate views.
//!
//! Views serialize straight from the domain types, which already carry
//! their camelCase wire names.

pub mod handlers;
pub mod routes;

pub use handlers::AnalyticsAppState;
pub use routes::analytics_routes;
