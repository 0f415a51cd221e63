//! HTTP adapter for organization membership.
//!
//! - `GET /api/organizations/:org_id/candidates?search=` - Candidate search
//! - `POST /api/organizations/:org_id/members` - Add members

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::OrganizationAppState;
pub use routes::organization_routes;
