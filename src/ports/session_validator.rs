//! Session validation port for access token validation.
//!
//! This port defines the contract for validating access tokens and extracting
//! user identity. The production implementation verifies the HS256 tokens the
//! hosted auth service issues; tests use an in-memory token table.
//!
//! All implementations MUST validate:
//! - **Signature**: Token was signed with the project's secret
//! - **Audience (aud)**: Token must be intended for this application
//! - **Expiry (exp)**: Token must not be expired

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// HTTP middleware uses this to validate Bearer tokens and extract the
/// authenticated user.
///
/// # Contract
///
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::WrongAudience` for tokens minted for someone else
/// - Keep the raw token on the returned user so data access can forward it
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
