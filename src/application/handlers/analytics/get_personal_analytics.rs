//! GetPersonalAnalyticsHandler - Query handler for the analytics page.

use std::sync::Arc;

use crate::application::handlers::cached::read_through;
use crate::domain::analytics::PersonalAnalytics;
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::ports::{DataGateway, ViewCache, ViewPath};

#[derive(Debug, Clone)]
pub struct GetPersonalAnalyticsQuery {
    pub user: AuthenticatedUser,
}

pub struct GetPersonalAnalyticsHandler {
    gateway: Arc<dyn DataGateway>,
    cache: Arc<dyn ViewCache>,
}

impl GetPersonalAnalyticsHandler {
    pub fn new(gateway: Arc<dyn DataGateway>, cache: Arc<dyn ViewCache>) -> Self {
        Self { gateway, cache }
    }

    pub async fn handle(
        &self,
        query: GetPersonalAnalyticsQuery,
    ) -> Result<PersonalAnalytics, DomainError> {
        let stores = self.gateway.session(&query.user)?;
        let user_id = &query.user.id;

        read_through(self.cache.as_ref(), ViewPath::Analytics, user_id, || async {
            let check_ins = stores.check_ins.list_for_user(user_id, None).await?;
            Ok(PersonalAnalytics::from_check_ins(&check_ins))
        })
        .await
    }
}
