//! Direct Postgres gateway pair.

use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::ports::{DataGateway, OrganizationMemberWriter, PrivilegedGateway, SessionStores};

use super::scope::PgScope;
use super::store::PgStore;

/// Opens the shared connection pool.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let mut options = PgConnectOptions::from_str(&config.url)?;
    if config.uses_transaction_pooler() {
        options = options.statement_cache_capacity(0);
    }
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect_with(options)
        .await
}

/// Session-scoped access over a shared pool.
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DataGateway for PgGateway {
    fn session(&self, user: &AuthenticatedUser) -> Result<SessionStores, DomainError> {
        let store = Arc::new(PgStore::new(PgScope::session(self.pool.clone(), user)));
        Ok(SessionStores {
            check_ins: store.clone(),
            emotions: store.clone(),
            profiles: store.clone(),
            members: store.clone(),
            gamification: store.clone(),
            emotion_stats: store,
        })
    }
}

/// Runs as the pool's own role, outside row-level policy.
pub struct PgPrivilegedGateway {
    store: Arc<PgStore>,
}

impl PgPrivilegedGateway {
    pub fn new(pool: PgPool) -> Self {
        Self {
            store: Arc::new(PgStore::new(PgScope::privileged(pool))),
        }
    }
}

impl PrivilegedGateway for PgPrivilegedGateway {
    fn organization_member_writer(&self) -> Arc<dyn OrganizationMemberWriter> {
        self.store.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AccessToken, OrganizationId, UserId};
    use crate::ports::CheckInRepository;

    fn database_url() -> Option<String> {
        std::env::var("DATABASE_URL").ok()
    }

    #[test]
    fn gateways_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgGateway>();
        assert_send_sync::<PgPrivilegedGateway>();
    }

    #[tokio::test]
    #[ignore = "Requires a database with the check-in schema"]
    async fn session_scope_counts_own_check_ins() {
        let Some(url) = database_url() else { return };
        let pool = PgPool::connect(&url).await.unwrap();
        let gateway = PgGateway::new(pool.clone());
        let user = AuthenticatedUser::new(
            UserId::from(uuid::Uuid::new_v4()),
            None,
            "authenticated",
            AccessToken::new("unused"),
        );

        let stores = gateway.session(&user).unwrap();
        assert_eq!(stores.check_ins.count_for_user(&user.id).await.unwrap(), 0);

        let writer = PgPrivilegedGateway::new(pool).organization_member_writer();
        assert_eq!(
            writer.add_members(&OrganizationId::new(), &[]).await.unwrap(),
            0
        );
    }
}
