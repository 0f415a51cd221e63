//! Application layer - Commands, Queries, Handlers, and widget state.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;
pub mod widgets;
