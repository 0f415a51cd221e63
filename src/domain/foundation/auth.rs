//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from an access token.
//! Any token issuer can populate them via the `SessionValidator` port.
//!
//! The raw access token travels with the user: session-scoped data access
//! forwards it so the database applies its row-level policies for that user.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use super::UserId;

/// Bearer token presented by the caller.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::new(token.into()))
    }

    /// Raw token, for forwarding to the data gateway only.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Authenticated user extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier (token subject).
    pub id: UserId,

    /// Email claim, when the token carries one.
    pub email: Option<String>,

    /// Database role claim (normally `authenticated`).
    pub role: String,

    /// The token the user authenticated with.
    pub access_token: AccessToken,
}

impl AuthenticatedUser {
    pub fn new(
        id: UserId,
        email: Option<String>,
        role: impl Into<String>,
        access_token: AccessToken,
    ) -> Self {
        Self {
            id,
            email,
            role: role.into(),
            access_token,
        }
    }
}

/// Errors that can occur during authentication.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The token was issued for another audience or issuer.
    #[error("Token not intended for this service")]
    WrongAudience,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}
