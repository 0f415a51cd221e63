//! Organization membership error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | EmptySelection | 400 |
//! | ValidationFailed | 400 |
//! | NotAMember | 403 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, OrganizationId, UserId};

/// Errors from adding members to an organization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MembershipError {
    /// No users were selected.
    #[error("At least one user must be selected")]
    EmptySelection,

    /// The requester does not belong to the organization.
    #[error("User {user_id} is not a member of organization {org_id}")]
    NotAMember {
        user_id: UserId,
        org_id: OrganizationId,
    },

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl MembershipError {
    pub fn not_a_member(user_id: UserId, org_id: OrganizationId) -> Self {
        MembershipError::NotAMember { user_id, org_id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::EmptySelection => ErrorCode::EmptyField,
            MembershipError::NotAMember { .. } => ErrorCode::Forbidden,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "request".to_string());
                MembershipError::ValidationFailed {
                    field,
                    message: err.message,
                }
            }
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}
