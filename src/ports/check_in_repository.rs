//! CheckInRepository port - check-in writes and per-user reads.

use async_trait::async_trait;

use crate::domain::checkin::{CheckIn, CheckInSummary, NewCheckIn};
use crate::domain::foundation::{DomainError, UserId};

/// Storage for check-in rows.
///
/// Implementations are bound to one access scope; under the session
/// gateway the database's row policies decide what is visible.
#[async_trait]
pub trait CheckInRepository: Send + Sync {
    /// Inserts a check-in and returns the stored row.
    async fn insert(&self, check_in: &NewCheckIn) -> Result<CheckIn, DomainError>;

    /// A user's check-ins joined to emotion names, newest first.
    ///
    /// `limit` of `None` returns every row.
    async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<CheckInSummary>, DomainError>;

    /// Number of check-ins visible to this scope.
    async fn count_all(&self) -> Result<u64, DomainError>;

    /// Number of check-ins recorded by one user.
    async fn count_for_user(&self, user_id: &UserId) -> Result<u64, DomainError>;
}
