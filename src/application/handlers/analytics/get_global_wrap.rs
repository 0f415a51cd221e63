//! GetGlobalWrapHandler - Query handler for the community-wide summary.
//!
//! Not cached: every request reads live counts.

use std::sync::Arc;

use futures::future::try_join4;

use crate::domain::analytics::{EmotionDistribution, GlobalWrap};
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::ports::DataGateway;

#[derive(Debug, Clone)]
pub struct GetGlobalWrapQuery {
    pub user: AuthenticatedUser,
}

pub struct GetGlobalWrapHandler {
    gateway: Arc<dyn DataGateway>,
}

impl GetGlobalWrapHandler {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, query: GetGlobalWrapQuery) -> Result<GlobalWrap, DomainError> {
        let stores = self.gateway.session(&query.user)?;

        let (total_users, total_check_ins, emotions, stats) = try_join4(
            stores.profiles.count_profiles(),
            stores.check_ins.count_all(),
            stores.emotions.list_emotions(),
            stores.emotion_stats.global_emotion_stats(),
        )
        .await?;

        let distribution = EmotionDistribution::from_counts(stats);
        Ok(GlobalWrap::new(
            total_users,
            total_check_ins,
            emotions,
            &distribution,
        ))
    }
}
