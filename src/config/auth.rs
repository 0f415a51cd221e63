//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Access token validation settings.
///
/// The hosted database issues HS256 access tokens signed with the project's
/// JWT secret; the same secret verifies them here.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Project JWT secret
    pub jwt_secret: String,

    /// Expected audience for tokens
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Expected issuer (`{gateway url}/auth/v1`); unchecked when absent
    pub issuer: Option<String>,

    /// Clock skew tolerance in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Production deployments must pin the issuer.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_JWT_SECRET"));
        }
        if self.jwt_secret.len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH_AUDIENCE"));
        }
        if *environment == Environment::Production && self.issuer.is_none() {
            return Err(ValidationError::MissingRequired("AUTH_ISSUER"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            audience: default_audience(),
            issuer: None,
            leeway_secs: default_leeway(),
        }
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}

fn default_leeway() -> u64 {
    30
}
