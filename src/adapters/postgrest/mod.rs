//! PostgREST gateway adapter.
//!
//! Talks to the hosted database's REST endpoint. Session-scoped stores
//! forward the caller's access token so row-level policies apply; the
//! privileged gateway authenticates with the service-role key.

mod client;
mod error;
mod gateway;
mod store;

pub use client::{parse_content_range_total, PostgrestClient};
pub use error::GatewayError;
pub use gateway::{RestGateway, RestPrivilegedGateway};
pub use store::RestStore;
