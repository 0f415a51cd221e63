//! Gateway pair backed by a single `InMemoryStore`.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::ports::{DataGateway, OrganizationMemberWriter, PrivilegedGateway, SessionStores};

use super::InMemoryStore;

/// Serves both access scopes from one store. Sessions are not isolated.
#[derive(Clone)]
pub struct MemoryGateway {
    store: Arc<InMemoryStore>,
}

impl MemoryGateway {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<InMemoryStore> {
        &self.store
    }
}

impl DataGateway for MemoryGateway {
    fn session(&self, _user: &AuthenticatedUser) -> Result<SessionStores, DomainError> {
        Ok(SessionStores {
            check_ins: self.store.clone(),
            emotions: self.store.clone(),
            profiles: self.store.clone(),
            members: self.store.clone(),
            gamification: self.store.clone(),
            emotion_stats: self.store.clone(),
        })
    }
}

impl PrivilegedGateway for MemoryGateway {
    fn organization_member_writer(&self) -> Arc<dyn OrganizationMemberWriter> {
        self.store.clone()
    }
}
