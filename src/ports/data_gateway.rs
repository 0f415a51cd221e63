//! Data access gateway ports.
//!
//! `DataGateway` hands out stores bound to one user's session, so the
//! database's row-level policies apply. `PrivilegedGateway` hands out the
//! one store that must bypass them. The two are separate types and the
//! privileged one is only wired into the membership write path.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};

use super::{
    CheckInRepository, EmotionReader, EmotionStatsReader, GamificationProcedures,
    OrganizationMemberReader, OrganizationMemberWriter, ProfileReader,
};

/// Stores scoped to one authenticated session.
#[derive(Clone)]
pub struct SessionStores {
    pub check_ins: Arc<dyn CheckInRepository>,
    pub emotions: Arc<dyn EmotionReader>,
    pub profiles: Arc<dyn ProfileReader>,
    pub members: Arc<dyn OrganizationMemberReader>,
    pub gamification: Arc<dyn GamificationProcedures>,
    pub emotion_stats: Arc<dyn EmotionStatsReader>,
}

/// Factory for session-scoped stores.
pub trait DataGateway: Send + Sync {
    fn session(&self, user: &AuthenticatedUser) -> Result<SessionStores, DomainError>;
}

/// Service-identity access that ignores row-level policy.
pub trait PrivilegedGateway: Send + Sync {
    fn organization_member_writer(&self) -> Arc<dyn OrganizationMemberWriter>;
}
