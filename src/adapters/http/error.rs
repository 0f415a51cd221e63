//! Error responses shared by every endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::organization::MembershipError;

/// Standard error body: `{ code, message, details? }`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::DatabaseError
        | ErrorCode::ProcedureFailed
        | ErrorCode::CacheError
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Server-side failures are logged in full and answered generically.
fn respond(status: StatusCode, code: ErrorCode, message: String) -> ErrorResponse {
    if status.is_server_error() {
        tracing::error!(code = %code, error = %message, "request failed");
        ErrorResponse::new(code.to_string(), "Internal server error")
    } else {
        ErrorResponse::new(code.to_string(), message)
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);
        let mut body = respond(status, self.0.code, self.0.message);
        if !status.is_server_error() && !self.0.details.is_empty() {
            body = body.with_details(serde_json::json!(self.0.details));
        }
        (status, Json(body)).into_response()
    }
}

/// API error for the membership endpoints.
#[derive(Debug)]
pub struct MembershipApiError(MembershipError);

impl From<MembershipError> for MembershipApiError {
    fn from(err: MembershipError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for MembershipApiError {
    fn from(err: DomainError) -> Self {
        Self(MembershipError::from(err))
    }
}

impl IntoResponse for MembershipApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status = status_for(code);
        let body = respond(status, code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}
