//! Axum router configuration for organization endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{add_members, search_candidates, OrganizationAppState};

/// # Routes
/// - `GET /organizations/:org_id/candidates` - Profiles that could be added
/// - `POST /organizations/:org_id/members` - Add a batch of members
pub fn organization_routes() -> Router<OrganizationAppState> {
    Router::new()
        .route(
            "/organizations/:org_id/candidates",
            get(search_candidates),
        )
        .route("/organizations/:org_id/members", post(add_members))
}
