//! Organization domain - profiles, membership, and candidate search.

mod errors;
mod profile;

pub use errors::MembershipError;
pub use profile::{sort_by_email, Profile};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OrganizationId, UserId};

/// Membership row linking a user to an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationMember {
    pub org_id: OrganizationId,
    pub user_id: UserId,
}

/// Profiles that could be added: not yet members and matching the search.
///
/// Input order is preserved.
pub fn candidates<'a>(
    profiles: &'a [Profile],
    existing_members: &HashSet<UserId>,
    search: &str,
) -> Vec<&'a Profile> {
    profiles
        .iter()
        .filter(|p| !existing_members.contains(&p.id))
        .filter(|p| p.matches_search(search))
        .collect()
}

/// Collapses repeated ids, keeping the first occurrence of each.
pub fn dedupe_user_ids(user_ids: Vec<UserId>) -> Vec<UserId> {
    let mut seen = HashSet::new();
    user_ids
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Outcome of adding a batch of users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembersAdded {
    pub added: usize,
    pub already_members: usize,
}
