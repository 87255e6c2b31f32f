//! Configuration for the authentication service

use chrono::Duration;
use se_shared::config::LockoutConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Lockout policy applied to failed logins
    pub lockout: LockoutConfig,
    /// Bcrypt cost factor for newly hashed passwords
    pub bcrypt_cost: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            lockout: LockoutConfig::default(),
            bcrypt_cost: 8,
        }
    }
}

impl AuthServiceConfig {
    /// Consecutive failures that engage the lock
    pub fn max_failed_attempts(&self) -> u32 {
        self.lockout.max_failed_attempts
    }

    /// How long an engaged lock lasts
    pub fn lock_duration(&self) -> Duration {
        self.lockout.lock_duration()
    }
}
