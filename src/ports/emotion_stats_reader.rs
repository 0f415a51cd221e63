//! EmotionStatsReader port - the community-wide emotion tally.
//!
//! Remote backends delegate to the `get_global_emotion_stats` procedure;
//! in-process backends tally their own rows.

use async_trait::async_trait;

use crate::domain::analytics::EmotionCount;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait EmotionStatsReader: Send + Sync {
    /// Check-in counts per emotion name across all users.
    async fn global_emotion_stats(&self) -> Result<Vec<EmotionCount>, DomainError>;
}
