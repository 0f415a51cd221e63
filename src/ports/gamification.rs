//! GamificationProcedures port - the streak, XP, and badge procedures.
//!
//! Each call is independent; there is no transaction spanning them or
//! the check-in insert that precedes them.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::gamification::{Badge, XpAward};

#[async_trait]
pub trait GamificationProcedures: Send + Sync {
    /// `update_user_streak(p_user_id)`. The result is not inspected.
    async fn update_streak(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// `add_user_xp(p_user_id, p_xp_amount)`.
    async fn add_xp(&self, user_id: &UserId, amount: u32) -> Result<Vec<XpAward>, DomainError>;

    /// `check_and_award_badges(p_user_id)`, returning newly awarded badges.
    async fn award_badges(&self, user_id: &UserId) -> Result<Vec<Badge>, DomainError>;
}
