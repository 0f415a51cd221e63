//! SearchCandidatesHandler - Query handler for users that could be added.
//!
//! Drives the same dialog state the client uses, so filtering and empty
//! messages stay identical on both sides.

use std::sync::Arc;

use crate::application::widgets::AddMembersDialog;
use crate::domain::foundation::{AuthenticatedUser, DomainError, OrganizationId};
use crate::domain::organization::Profile;
use crate::ports::DataGateway;

#[derive(Debug, Clone)]
pub struct SearchCandidatesQuery {
    pub requester: AuthenticatedUser,
    pub org_id: OrganizationId,
    pub search: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidatesResult {
    pub candidates: Vec<Profile>,
    pub empty_message: Option<&'static str>,
}

pub struct SearchCandidatesHandler {
    gateway: Arc<dyn DataGateway>,
}

impl SearchCandidatesHandler {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        query: SearchCandidatesQuery,
    ) -> Result<SearchCandidatesResult, DomainError> {
        let stores = self.gateway.session(&query.requester)?;

        let mut dialog = AddMembersDialog::new(query.org_id);
        dialog
            .open(stores.profiles.as_ref(), stores.members.as_ref())
            .await?;
        dialog.set_search(query.search);

        Ok(SearchCandidatesResult {
            candidates: dialog.candidates().into_iter().cloned().collect(),
            empty_message: dialog.empty_message(),
        })
    }
}
