//! GetProfileOverviewHandler - Query handler for the profile page.

use std::sync::Arc;

use futures::future::try_join3;

use crate::application::handlers::cached::read_through;
use crate::domain::analytics::ProfileOverview;
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::ports::{DataGateway, ViewCache, ViewPath};

#[derive(Debug, Clone)]
pub struct GetProfileOverviewQuery {
    pub user: AuthenticatedUser,
}

pub struct GetProfileOverviewHandler {
    gateway: Arc<dyn DataGateway>,
    cache: Arc<dyn ViewCache>,
}

impl GetProfileOverviewHandler {
    pub fn new(gateway: Arc<dyn DataGateway>, cache: Arc<dyn ViewCache>) -> Self {
        Self { gateway, cache }
    }

    pub async fn handle(
        &self,
        query: GetProfileOverviewQuery,
    ) -> Result<ProfileOverview, DomainError> {
        let stores = self.gateway.session(&query.user)?;
        let user_id = &query.user.id;

        read_through(self.cache.as_ref(), ViewPath::Profile, user_id, || async {
            let (profile, total_check_ins, latest) = try_join3(
                stores.profiles.find_profile(user_id),
                stores.check_ins.count_for_user(user_id),
                stores.check_ins.list_for_user(user_id, Some(1)),
            )
            .await?;

            Ok(ProfileOverview {
                profile,
                total_check_ins,
                last_check_in_at: latest.first().map(|c| c.created_at),
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::cache::InMemoryViewCache;
    use crate::adapters::memory::{InMemoryStore, MemoryGateway};
    use crate::domain::checkin::NewCheckIn;
    use crate::domain::foundation::{AccessToken, UserId};
    use crate::domain::organization::Profile;
    use crate::ports::CheckInRepository;
    use std::time::Duration;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("u1").unwrap(),
            Some("u1@example.com".to_string()),
            "authenticated",
            AccessToken::new("token"),
        )
    }

    fn handler(store: Arc<InMemoryStore>) -> GetProfileOverviewHandler {
        GetProfileOverviewHandler::new(
            Arc::new(MemoryGateway::new(store)),
            Arc::new(InMemoryViewCache::new(Duration::from_secs(60))),
        )
    }

    #[tokio::test]
    async fn reports_profile_count_and_latest_check_in() {
        let store = Arc::new(InMemoryStore::seeded());
        store.add_profile(Profile::new(user().id).with_display_name("Uma"));
        let stored = store
            .insert(&NewCheckIn {
                user_id: user().id,
                emotion_id: store.emotion_id("Love").unwrap(),
                intensity: 6,
                triggers: vec![],
            })
            .await
            .unwrap();

        let overview = handler(store)
            .handle(GetProfileOverviewQuery { user: user() })
            .await
            .unwrap();

        assert_eq!(
            overview.profile.unwrap().display_name.as_deref(),
            Some("Uma")
        );
        assert_eq!(overview.total_check_ins, 1);
        assert_eq!(overview.last_check_in_at, Some(stored.created_at));
    }

    #[tokio::test]
    async fn missing_profile_is_not_an_error() {
        let overview = handler(Arc::new(InMemoryStore::new()))
            .handle(GetProfileOverviewQuery { user: user() })
            .await
            .unwrap();

        assert!(overview.profile.is_none());
        assert_eq!(overview.total_check_ins, 0);
        assert!(overview.last_check_in_at.is_none());
    }
}
