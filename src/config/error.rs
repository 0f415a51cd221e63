//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address")]
    InvalidBindAddress,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid gateway URL format")]
    InvalidGatewayUrl,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Database min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Database max_connections must be between 1 and 40")]
    PoolSizeOutOfRange,

    #[error("JWT secret must be at least 32 characters")]
    JwtSecretTooShort,

    #[error("Retry attempts must be between 1 and 10")]
    InvalidRetryAttempts,

    #[error("Cache TTL must be at most one week")]
    CacheTtlTooLong,
}
