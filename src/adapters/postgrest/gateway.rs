//! REST gateway pair.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use secrecy::SecretString;

use crate::config::GatewayConfig;
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::ports::{DataGateway, OrganizationMemberWriter, PrivilegedGateway, SessionStores};

use super::client::PostgrestClient;
use super::error::GatewayError;
use super::store::RestStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn http_client() -> Result<Client, GatewayError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| GatewayError::Client(e.to_string()))
}

/// Hands out stores that act with the caller's access token.
pub struct RestGateway {
    http: Client,
    base_url: String,
    anon_key: SecretString,
}

impl RestGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            http: http_client()?,
            base_url: config.base_url().to_string(),
            anon_key: SecretString::new(config.anon_key.clone()),
        })
    }
}

impl DataGateway for RestGateway {
    fn session(&self, user: &AuthenticatedUser) -> Result<SessionStores, DomainError> {
        let client = PostgrestClient::new(
            self.http.clone(),
            &self.base_url,
            self.anon_key.clone(),
            SecretString::new(user.access_token.expose().to_string()),
        );
        let store = Arc::new(RestStore::new(client));
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

/// Service-role access. Built once at startup.
pub struct RestPrivilegedGateway {
    store: Arc<RestStore>,
}

impl RestPrivilegedGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let key = SecretString::new(config.service_role_key.clone());
        let client = PostgrestClient::new(http_client()?, config.base_url(), key.clone(), key);
        Ok(Self {
            store: Arc::new(RestStore::new(client)),
        })
    }
}

impl PrivilegedGateway for RestPrivilegedGateway {
    fn organization_member_writer(&self) -> Arc<dyn OrganizationMemberWriter> {
        self.store.clone()
    }
}

impl std::fmt::Debug for RestGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
