//! Mock session validator for tests and local development.
//!
//! # Example
//!
//! ```ignore
//! use moodwrap::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new().with_test_user("valid-token", "user-123");
//! let user = validator.validate("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AccessToken, AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that maps to a user.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Adds a valid token for a plain `authenticated` user with the given ID.
    ///
    /// Blank IDs are ignored.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        let token = token.into();
        let Ok(id) = UserId::new(user_id) else {
            return self;
        };
        let email = format!("{}@test.example.com", id);
        let user = AuthenticatedUser::new(
            id,
            Some(email),
            "authenticated",
            AccessToken::new(token.clone()),
        );
        self.with_user(token, user)
    }

    /// Forces all validations to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self
            .force_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    /// Registers a new valid token at runtime.
    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.into(), user);
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
