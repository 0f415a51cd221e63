//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Access token validation
//! - `cache` - Rendered view cache (in-memory, Redis)
//! - `http` - Axum REST surface
//! - `memory` - In-process data gateway
//! - `postgres` - Direct PostgreSQL data gateway
//! - `postgrest` - Hosted REST data gateway

pub mod auth;
pub mod cache;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod postgrest;
