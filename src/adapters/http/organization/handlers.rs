//! HTTP handlers for organization membership endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::organization::{
    AddMembersCommand, AddMembersHandler, SearchCandidatesHandler, SearchCandidatesQuery,
};
use crate::domain::foundation::OrganizationId;
use crate::ports::{DataGateway, PrivilegedGateway};

use super::dto::{AddMembersRequest, CandidateListResponse, CandidateSearchParams};
use crate::adapters::http::error::{ApiError, MembershipApiError};
use crate::adapters::http::middleware::RequireAuth;

/// The only state that carries the privileged gateway.
#[derive(Clone)]
pub struct OrganizationAppState {
    pub gateway: Arc<dyn DataGateway>,
    pub privileged: Arc<dyn PrivilegedGateway>,
}

impl OrganizationAppState {
    pub fn add_members_handler(&self) -> AddMembersHandler {
        AddMembersHandler::new(self.gateway.clone(), self.privileged.clone())
    }

    pub fn search_candidates_handler(&self) -> SearchCandidatesHandler {
        SearchCandidatesHandler::new(self.gateway.clone())
    }
}

/// GET /api/organizations/:org_id/candidates?search=
pub async fn search_candidates(
    State(state): State<OrganizationAppState>,
    RequireAuth(user): RequireAuth,
    Path(org_id): Path<OrganizationId>,
    Query(params): Query<CandidateSearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .search_candidates_handler()
        .handle(SearchCandidatesQuery {
            requester: user,
            org_id,
            search: params.search,
        })
        .await?;
    Ok(Json(CandidateListResponse::from(result)))
}

/// POST /api/organizations/:org_id/members
pub async fn add_members(
    State(state): State<OrganizationAppState>,
    RequireAuth(user): RequireAuth,
    Path(org_id): Path<OrganizationId>,
    Json(request): Json<AddMembersRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let added = state
        .add_members_handler()
        .handle(AddMembersCommand {
            requester: user,
            org_id,
            user_ids: request.user_ids,
        })
        .await?;
    Ok((StatusCode::OK, Json(added)))
}
