//! Add-members dialog state.
//!
//! On open the dialog loads the profile directory and the organization's
//! current members side by side. Candidates are the non-members whose email
//! or display name contains the live search term. Submitting sends the whole
//! selection; success clears it and closes, failure keeps both.

use std::collections::HashSet;
use std::future::Future;

use futures::future::try_join;

use crate::domain::foundation::{DomainError, OrganizationId, UserId};
use crate::domain::organization::{candidates, MembersAdded, MembershipError, Profile};
use crate::ports::{OrganizationMemberReader, ProfileReader};

pub const NO_MATCH_MESSAGE: &str = "No users found matching this email";
pub const SEARCH_PROMPT_MESSAGE: &str = "Type an email to search";

/// What a submit attempt led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSubmission {
    /// Nothing was sent: no selection, or a submit already in flight.
    Blocked,
    /// Members were added; the dialog closed and the host should refresh.
    Added(MembersAdded),
    /// The action failed; selection and dialog are kept.
    Failed(String),
}

pub struct AddMembersDialog {
    org_id: OrganizationId,
    is_open: bool,
    profiles: Vec<Profile>,
    existing_members: HashSet<UserId>,
    search: String,
    selected: Vec<UserId>,
    submitting: bool,
    last_error: Option<String>,
}

impl AddMembersDialog {
    pub fn new(org_id: OrganizationId) -> Self {
        Self {
            org_id,
            is_open: false,
            profiles: Vec::new(),
            existing_members: HashSet::new(),
            search: String::new(),
            selected: Vec::new(),
            submitting: false,
            last_error: None,
        }
    }

    pub fn org_id(&self) -> OrganizationId {
        self.org_id
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Opens the dialog, loading profiles and existing members concurrently.
    pub async fn open(
        &mut self,
        profiles: &dyn ProfileReader,
        members: &dyn OrganizationMemberReader,
    ) -> Result<(), DomainError> {
        let (all_profiles, member_ids) =
            try_join(profiles.list_profiles(), members.member_ids(&self.org_id)).await?;

        self.profiles = all_profiles;
        self.existing_members = member_ids.into_iter().collect();
        self.is_open = true;
        Ok(())
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn candidates(&self) -> Vec<&Profile> {
        candidates(&self.profiles, &self.existing_members, &self.search)
    }

    /// Message to show in place of an empty candidate list.
    pub fn empty_message(&self) -> Option<&'static str> {
        if !self.candidates().is_empty() {
            None
        } else if self.search.is_empty() {
            Some(SEARCH_PROMPT_MESSAGE)
        } else {
            Some(NO_MATCH_MESSAGE)
        }
    }

    pub fn toggle(&mut self, user_id: &UserId) {
        match self.selected.iter().position(|id| id == user_id) {
            Some(i) => {
                self.selected.remove(i);
            }
            None => self.selected.push(user_id.clone()),
        }
    }

    pub fn is_selected(&self, user_id: &UserId) -> bool {
        self.selected.contains(user_id)
    }

    pub fn selected(&self) -> &[UserId] {
        &self.selected
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.selected.is_empty()
    }

    pub fn submit_label(&self) -> String {
        if self.submitting {
            return "Adding...".to_string();
        }
        let n = self.selected.len();
        format!("Add {} Member{}", n, if n == 1 { "" } else { "s" })
    }

    /// Marks the dialog busy and hands out the selection to send.
    pub fn begin_submit(&mut self) -> Option<Vec<UserId>> {
        if !self.can_submit() {
            return None;
        }
        self.submitting = true;
        Some(self.selected.clone())
    }

    pub fn finish_submit(
        &mut self,
        result: Result<MembersAdded, MembershipError>,
    ) -> MemberSubmission {
        self.submitting = false;
        match result {
            Ok(added) => {
                self.selected.clear();
                self.last_error = None;
                self.is_open = false;
                MemberSubmission::Added(added)
            }
            Err(e) => {
                tracing::error!(org_id = %self.org_id, error = %e, "adding members failed");
                let message = e.to_string();
                self.last_error = Some(message.clone());
                MemberSubmission::Failed(message)
            }
        }
    }

    /// Sends the selection through `add`, which is not called when blocked.
    pub async fn submit<F, Fut>(&mut self, add: F) -> MemberSubmission
    where
        F: FnOnce(OrganizationId, Vec<UserId>) -> Fut,
        Fut: Future<Output = Result<MembersAdded, MembershipError>>,
    {
        match self.begin_submit() {
            Some(user_ids) => {
                let result = add(self.org_id, user_ids).await;
                self.finish_submit(result)
            }
            None => MemberSubmission::Blocked,
        }
    }
}
