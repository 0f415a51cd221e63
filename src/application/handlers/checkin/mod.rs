//! Check-in handlers.
//!
//! ## Commands
//! - Recording a check-in (insert plus streak/XP/badge side effects)
//!
//! ## Queries
//! - The check-in page (emotion catalog and recent check-ins)

mod get_check_in_view;
mod record_check_in;

// Commands
pub use record_check_in::{RecordCheckInCommand, RecordCheckInHandler};

// Queries
pub use get_check_in_view::{GetCheckInViewHandler, GetCheckInViewQuery};
