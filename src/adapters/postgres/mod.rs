//! PostgreSQL gateway adapter.
//!
//! Connects straight to the database with sqlx. Session scope replays what
//! the REST endpoint does for each request (JWT claims plus the
//! `authenticated` role inside a transaction); privileged scope skips it.

mod gateway;
mod scope;
mod store;

pub use gateway::{connect, PgGateway, PgPrivilegedGateway};
pub use store::PgStore;
