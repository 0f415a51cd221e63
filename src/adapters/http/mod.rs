//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with handlers, DTOs and routes; `router`
//! stitches them together behind the auth middleware.

pub mod analytics;
pub mod checkin;
pub mod error;
pub mod middleware;
pub mod organization;
pub mod router;

pub use error::{ApiError, ErrorResponse, MembershipApiError};
pub use router::{build_router, AppDependencies};
