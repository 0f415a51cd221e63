//! Organization membership ports.
//!
//! Reading membership goes through the caller's session. Writing other
//! users into an organization needs the privileged identity, so the writer
//! is only handed out by `PrivilegedGateway`.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrganizationId, UserId};

#[async_trait]
pub trait OrganizationMemberReader: Send + Sync {
    /// User ids currently in the organization.
    async fn member_ids(&self, org_id: &OrganizationId) -> Result<Vec<UserId>, DomainError>;
}

#[async_trait]
pub trait OrganizationMemberWriter: Send + Sync {
    /// Inserts membership rows, ignoring pairs that already exist.
    ///
    /// Returns how many rows were actually created.
    async fn add_members(
        &self,
        org_id: &OrganizationId,
        user_ids: &[UserId],
    ) -> Result<usize, DomainError>;
}
