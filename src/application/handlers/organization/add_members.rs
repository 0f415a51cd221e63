//! AddMembersHandler - Command handler for adding users to an organization.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, OrganizationId, UserId};
use crate::domain::organization::{dedupe_user_ids, MembersAdded, MembershipError};
use crate::ports::{DataGateway, PrivilegedGateway};

/// Command to add a batch of users to an organization.
#[derive(Debug, Clone)]
pub struct AddMembersCommand {
    pub requester: AuthenticatedUser,
    pub org_id: OrganizationId,
    pub user_ids: Vec<UserId>,
}

/// Handler for adding members.
///
/// Membership is read through the requester's session; only the final
/// insert uses the privileged writer.
pub struct AddMembersHandler {
    gateway: Arc<dyn DataGateway>,
    privileged: Arc<dyn PrivilegedGateway>,
}

impl AddMembersHandler {
    pub fn new(gateway: Arc<dyn DataGateway>, privileged: Arc<dyn PrivilegedGateway>) -> Self {
        Self {
            gateway,
            privileged,
        }
    }

    pub async fn handle(&self, cmd: AddMembersCommand) -> Result<MembersAdded, MembershipError> {
        // 1. Validate the selection
        if cmd.user_ids.is_empty() {
            return Err(MembershipError::EmptySelection);
        }
        let requested = dedupe_user_ids(cmd.user_ids);

        // 2. Requester must already belong to the organization
        let stores = self.gateway.session(&cmd.requester)?;
        let existing: HashSet<UserId> = stores
            .members
            .member_ids(&cmd.org_id)
            .await?
            .into_iter()
            .collect();
        if !existing.contains(&cmd.requester.id) {
            return Err(MembershipError::not_a_member(
                cmd.requester.id.clone(),
                cmd.org_id,
            ));
        }

        // 3. Skip users who are already in
        let to_add: Vec<UserId> = requested
            .iter()
            .filter(|id| !existing.contains(*id))
            .cloned()
            .collect();
        let skipped = requested.len() - to_add.len();

        if to_add.is_empty() {
            return Ok(MembersAdded {
                added: 0,
                already_members: skipped,
            });
        }

        // 4. Privileged insert; rows added concurrently by someone else are ignored
        let added = self
            .privileged
            .organization_member_writer()
            .add_members(&cmd.org_id, &to_add)
            .await?;

        tracing::info!(
            org_id = %cmd.org_id,
            requester = %cmd.requester.id,
            added,
            skipped,
            "organization members added"
        );

        Ok(MembersAdded {
            added,
            already_members: skipped + (to_add.len() - added.min(to_add.len())),
        })
    }
}
