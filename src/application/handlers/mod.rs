//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

mod cached;

pub mod analytics;
pub mod checkin;
pub mod organization;
