//! View cache configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on `ttl_secs`; one week.
pub const MAX_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Where rendered views are cached.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
}

/// View cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// Redis connection URL (redis backend only)
    #[serde(default)]
    pub url: String,

    /// How long a rendered view stays valid, in seconds
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// Get TTL as Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Validate cache configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ttl_secs > MAX_TTL_SECS {
            return Err(ValidationError::CacheTtlTooLong);
        }
        if self.backend == CacheBackend::Redis {
            if self.url.is_empty() {
                return Err(ValidationError::MissingRequired("CACHE_URL"));
            }
            if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
                return Err(ValidationError::InvalidRedisUrl);
            }
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            url: String::new(),
            ttl_secs: default_ttl(),
        }
    }
}

fn default_ttl() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.backend, CacheBackend::Memory);
        assert_eq!(config.ttl(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_redis_requires_url() {
        let config = CacheConfig {
            backend: CacheBackend::Redis,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redis_url_scheme() {
        let config = CacheConfig {
            backend: CacheBackend::Redis,
            url: "http://localhost:6379".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidRedisUrl)
        ));

        let config = CacheConfig {
            url: "redis://localhost:6379".to_string(),
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ttl_is_bounded() {
        let config = CacheConfig {
            ttl_secs: u64::MAX,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::CacheTtlTooLong)));

        let config = CacheConfig {
            ttl_secs: MAX_TTL_SECS,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
