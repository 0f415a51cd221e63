//! GetCheckInViewHandler - Query handler for the check-in page.

use std::sync::Arc;

use futures::future::try_join;

use crate::application::handlers::cached::read_through;
use crate::domain::analytics::{CheckInView, RECENT_CHECK_IN_LIMIT};
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::ports::{DataGateway, ViewCache, ViewPath};

#[derive(Debug, Clone)]
pub struct GetCheckInViewQuery {
    pub user: AuthenticatedUser,
}

pub struct GetCheckInViewHandler {
    gateway: Arc<dyn DataGateway>,
    cache: Arc<dyn ViewCache>,
}

impl GetCheckInViewHandler {
    pub fn new(gateway: Arc<dyn DataGateway>, cache: Arc<dyn ViewCache>) -> Self {
        Self { gateway, cache }
    }

    pub async fn handle(&self, query: GetCheckInViewQuery) -> Result<CheckInView, DomainError> {
        let stores = self.gateway.session(&query.user)?;
        let user_id = &query.user.id;

        read_through(self.cache.as_ref(), ViewPath::CheckIn, user_id, || async {
            let (emotions, recent_check_ins) = try_join(
                stores.emotions.list_emotions(),
                stores
                    .check_ins
                    .list_for_user(user_id, Some(RECENT_CHECK_IN_LIMIT)),
            )
            .await?;

            Ok(CheckInView {
                emotions,
                recent_check_ins,
            })
        })
        .await
    }
}
