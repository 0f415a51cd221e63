//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - Verifies the hosted auth service's HS256 access tokens
//! - `mock` - Token table for tests and the in-memory backend

mod jwt;
mod mock;

pub use jwt::JwtSessionValidator;
pub use mock::MockSessionValidator;
