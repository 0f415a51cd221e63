//! REST gateway errors.

use thiserror::Error;

use crate::domain::foundation::DomainError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("Request not sent: {0}")]
    Unsent(String),

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Gateway returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Response missing {0}")]
    Missing(&'static str),
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else if e.is_connect() || e.is_builder() {
            GatewayError::Unsent(e.to_string())
        } else {
            GatewayError::Network(e.to_string())
        }
    }
}

impl GatewayError {
    /// True when the request provably had no effect on the server.
    ///
    /// PostgREST runs each request in a transaction and rolls it back before
    /// answering 500 or 503. A 502 or 504 comes from a proxy in front of it and
    /// says nothing about whether the call ran; neither does a failure while
    /// reading or decoding a 2xx body.
    pub fn never_applied(&self) -> bool {
        match self {
            GatewayError::Client(_) | GatewayError::Unsent(_) => true,
            GatewayError::Status { status, .. } => matches!(status, 500 | 503),
            GatewayError::Network(_) | GatewayError::Decode(_) | GatewayError::Missing(_) => false,
        }
    }
}

impl From<GatewayError> for DomainError {
    fn from(e: GatewayError) -> Self {
        DomainError::database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn converts_to_database_error() {
        let e: DomainError = GatewayError::Missing("content-range header").into();
        assert_eq!(e.code, ErrorCode::DatabaseError);
        assert!(e.message.contains("content-range"));
    }

    #[test]
    fn only_unsent_or_rolled_back_requests_are_unapplied() {
        assert!(GatewayError::Unsent("connection refused".into()).never_applied());
        assert!(GatewayError::Status { status: 503, body: String::new() }.never_applied());
        assert!(GatewayError::Status { status: 500, body: String::new() }.never_applied());

        assert!(!GatewayError::Decode("expected a sequence".into()).never_applied());
        assert!(!GatewayError::Network("connection reset".into()).never_applied());
        assert!(!GatewayError::Status { status: 504, body: String::new() }.never_applied());
        assert!(!GatewayError::Status { status: 400, body: String::new() }.never_applied());
    }
}
