//! Check-in side effect configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::gamification::RetryPolicy;

/// Settings for the streak/XP/badge calls that follow a check-in.
#[derive(Debug, Clone, Deserialize)]
pub struct GamificationConfig {
    /// XP awarded per recorded check-in
    #[serde(default = "default_xp_per_check_in")]
    pub xp_per_check_in: u32,

    /// Attempts per side effect before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry; doubles on each further retry
    #[serde(default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

impl GamificationConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Retry policy applied to each side effect.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.retry_backoff())
    }

    /// Validate gamification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 || self.max_attempts > 10 {
            return Err(ValidationError::InvalidRetryAttempts);
        }
        Ok(())
    }
}

impl Default for GamificationConfig {
    fn default() -> Self {
        Self {
            xp_per_check_in: default_xp_per_check_in(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff(),
        }
    }
}

fn default_xp_per_check_in() -> u32 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_backoff() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GamificationConfig::default();
        assert_eq!(config.xp_per_check_in, 10);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.retry_backoff(), Duration::from_millis(100));
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_attempt_bounds() {
        let config = GamificationConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GamificationConfig {
            max_attempts: 11,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
