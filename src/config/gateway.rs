//! Data access gateway configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Which store backs the data access gateway.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayBackend {
    /// Hosted REST endpoint (`{url}/rest/v1`)
    #[default]
    Rest,
    /// Direct PostgreSQL connection (see `DatabaseConfig`)
    Postgres,
    /// In-process store, development only
    Memory,
}

/// Gateway configuration.
///
/// `url` and `service_role_key` configure the privileged client; the
/// `anon_key` identifies the project on session-scoped requests.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GatewayConfig {
    #[serde(default)]
    pub backend: GatewayBackend,

    /// Project base URL, e.g. `https://abc.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Public (anon) project key
    #[serde(default)]
    pub anon_key: String,

    /// Service-role key; bypasses row-level security
    #[serde(default)]
    pub service_role_key: String,
}

impl GatewayConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend != GatewayBackend::Rest {
            return Ok(());
        }
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_URL"));
        }
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        if self.anon_key.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_ANON_KEY"));
        }
        if self.service_role_key.is_empty() {
            return Err(ValidationError::MissingRequired("GATEWAY_SERVICE_ROLE_KEY"));
        }
        Ok(())
    }
}
