//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the moodwrap domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AccessToken, AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CheckInId, EmotionId, OrganizationId, UserId};
pub use timestamp::Timestamp;
