//! ProfileReader port for profile query operations

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::organization::Profile;

/// Query operations for user profiles
#[async_trait]
pub trait ProfileReader: Send + Sync {
    /// All profiles visible to this scope, ordered by email
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError>;

    /// Exact number of profiles
    async fn count_profiles(&self) -> Result<u64, DomainError>;

    /// A single profile by user id
    async fn find_profile(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;
}
