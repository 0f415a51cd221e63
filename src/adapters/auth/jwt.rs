//! HS256 access token validator.
//!
//! The hosted auth service signs access tokens with the project's shared JWT
//! secret. This adapter verifies them locally and maps claims to the domain
//! `AuthenticatedUser`, keeping the raw token for session-scoped data access.
//!
//! # Security
//!
//! Every token is checked for:
//! - **Signature**: HS256 with the configured secret
//! - **Audience (aud)**: Must contain the configured audience
//! - **Issuer (iss)**: When configured
//! - **Expiry (exp)**: Must be in the future, within the configured leeway

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AccessToken, AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Claims carried by the hosted auth service's access tokens.
#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    /// Subject - the user ID
    sub: String,

    #[serde(default)]
    aud: Audience,

    exp: i64,

    #[serde(default)]
    email: Option<String>,

    /// Database role the session runs as
    #[serde(default)]
    role: Option<String>,
}

/// Audience can be a single string or array of strings in JWTs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
enum Audience {
    #[default]
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    fn contains(&self, expected: &str) -> bool {
        match self {
            Audience::None => false,
            Audience::Single(s) => s == expected,
            Audience::Multiple(v) => v.iter().any(|s| s == expected),
        }
    }
}

/// Production `SessionValidator`.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    audience: String,
}

impl JwtSessionValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        validation.leeway = config.leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            audience: config.audience.clone(),
        }
    }

    fn decode_claims(&self, token: &str) -> Result<AccessClaims, AuthError> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => {
                    tracing::warn!(error = %e, "Token minted for another service");
                    AuthError::WrongAudience
                }
                _ => {
                    tracing::warn!(error = %e, "Token validation failed");
                    AuthError::InvalidToken
                }
            })
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.decode_claims(token)?;

        if !claims.aud.contains(&self.audience) {
            tracing::warn!(aud = ?claims.aud, "Audience mismatch after validation");
            return Err(AuthError::WrongAudience);
        }

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Token subject is blank");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(
            user_id,
            claims.email,
            claims.role.unwrap_or_else(|| "authenticated".to_string()),
            AccessToken::new(token),
        ))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}
