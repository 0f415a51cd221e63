//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MOODWRAP_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use moodwrap::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Gateway backend: {:?}", config.gateway.backend);
//! ```

mod auth;
mod cache;
mod database;
mod error;
mod gamification;
mod gateway;
mod server;

pub use auth::AuthConfig;
pub use cache::{CacheBackend, CacheConfig};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use gamification::GamificationConfig;
pub use gateway::{GatewayBackend, GatewayConfig};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Data access gateway (hosted REST endpoint, direct Postgres, or memory)
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Direct PostgreSQL connection, used by the `postgres` gateway backend
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Access token validation
    pub auth: AuthConfig,

    /// Rendered view cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Check-in side effects (XP award, retry policy)
    #[serde(default)]
    pub gamification: GamificationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MOODWRAP` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MOODWRAP__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MOODWRAP__GATEWAY__URL=...` -> `gateway.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MOODWRAP")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// A gateway backend without its credentials is rejected here, so a
    /// misconfigured deployment fails at startup rather than on first request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.gateway.validate()?;
        if self.gateway.backend == GatewayBackend::Postgres {
            self.database.validate()?;
        }
        self.auth.validate(&self.server.environment)?;
        self.cache.validate()?;
        self.gamification.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("MOODWRAP__GATEWAY__URL", "https://project.supabase.co");
        env::set_var("MOODWRAP__GATEWAY__ANON_KEY", "anon-key");
        env::set_var("MOODWRAP__GATEWAY__SERVICE_ROLE_KEY", "service-role-key");
        env::set_var("MOODWRAP__AUTH__JWT_SECRET", "super-secret-jwt-token-with-at-least-32-characters");
    }

    fn clear_env() {
        env::remove_var("MOODWRAP__GATEWAY__URL");
        env::remove_var("MOODWRAP__GATEWAY__ANON_KEY");
        env::remove_var("MOODWRAP__GATEWAY__SERVICE_ROLE_KEY");
        env::remove_var("MOODWRAP__GATEWAY__BACKEND");
        env::remove_var("MOODWRAP__AUTH__JWT_SECRET");
        env::remove_var("MOODWRAP__SERVER__PORT");
        env::remove_var("MOODWRAP__SERVER__ENVIRONMENT");
        env::remove_var("MOODWRAP__GAMIFICATION__XP_PER_CHECK_IN");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.gateway.url, "https://project.supabase.co");
        assert_eq!(config.gateway.backend, GatewayBackend::Rest);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_service_role_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::remove_var("MOODWRAP__GATEWAY__SERVICE_ROLE_KEY");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("GATEWAY_SERVICE_ROLE_KEY"))
        ));
    }

    #[test]
    fn test_memory_backend_needs_no_credentials() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("MOODWRAP__GATEWAY__BACKEND", "memory");
        env::set_var("MOODWRAP__AUTH__JWT_SECRET", "super-secret-jwt-token-with-at-least-32-characters");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gateway.backend, GatewayBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.gamification.xp_per_check_in, 10);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MOODWRAP__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_xp_award() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("MOODWRAP__GAMIFICATION__XP_PER_CHECK_IN", "25");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gamification.xp_per_check_in, 25);
    }
}
