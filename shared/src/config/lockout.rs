//! Failed-login lockout policy configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Policy for temporary account lockout after repeated failed logins
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LockoutConfig {
    /// Consecutive failed attempts before the account is locked
    pub max_failed_attempts: u32,

    /// Duration in seconds for which an account remains locked
    pub lock_duration_seconds: u64,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 3,
            lock_duration_seconds: 300, // 5 minutes
        }
    }
}

impl LockoutConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let max_failed_attempts = std::env::var("LOCKOUT_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);
        let lock_duration_seconds = std::env::var("LOCKOUT_DURATION_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        Self {
            max_failed_attempts,
            lock_duration_seconds,
        }
    }

    /// Lock duration as a chrono `Duration`
    pub fn lock_duration(&self) -> Duration {
        Duration::seconds(self.lock_duration_seconds as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lockout_config_default() {
        let config = LockoutConfig::default();
        assert_eq!(config.max_failed_attempts, 3);
        assert_eq!(config.lock_duration(), Duration::minutes(5));
    }
}
