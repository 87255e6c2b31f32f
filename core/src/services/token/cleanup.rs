//! Periodic maintenance of lockout state and refresh-token records
//!
//! The request path never depends on this sweep: elapsed locks are treated
//! as inactive when read, and expired refresh tokens fail signature
//! validation anyway. The sweep only keeps the store from accumulating
//! stale session records and lock timestamps.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::errors::DomainError;
use crate::repositories::UserRepository;

/// Configuration for the maintenance sweep
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable the sweep
    pub enabled: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60, // Run every minute
            enabled: true,
        }
    }
}

/// Summary of a single sweep cycle
#[derive(Debug, Clone, Default)]
pub struct CleanupResult {
    /// Accounts whose elapsed lock timestamp was cleared
    pub locks_cleared: usize,
    /// Expired refresh-token records removed
    pub tokens_purged: usize,
    /// Errors encountered during the cycle
    pub errors: Vec<String>,
}

/// Service that sweeps expired lockout and session state
pub struct CleanupService<R: UserRepository + 'static> {
    repository: Arc<R>,
    config: CleanupConfig,
}

impl<R: UserRepository> CleanupService<R> {
    /// Create a new cleanup service
    pub fn new(repository: Arc<R>, config: CleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Create a cleanup service with default configuration
    pub fn with_defaults(repository: Arc<R>) -> Self {
        Self::new(repository, CleanupConfig::default())
    }

    /// Run a single sweep cycle
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of what the cycle removed
    /// * `Err(DomainError)` - Never returned directly; per-step failures
    ///   are collected into the result so one failing step does not stop
    ///   the other
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let mut result = CleanupResult::default();
        let now = Utc::now();

        match self.repository.clear_expired_locks(now).await {
            Ok(count) => {
                result.locks_cleared = count;
                if count > 0 {
                    info!(count, "Cleared expired account locks");
                }
            }
            Err(e) => {
                error!("Failed to clear expired locks: {}", e);
                result.errors.push(format!("Lock cleanup error: {}", e));
            }
        }

        match self.repository.purge_expired_refresh_tokens(now).await {
            Ok(count) => {
                result.tokens_purged = count;
                if count > 0 {
                    info!(count, "Purged expired refresh tokens");
                }
            }
            Err(e) => {
                error!("Failed to purge expired refresh tokens: {}", e);
                result.errors.push(format!("Token cleanup error: {}", e));
            }
        }

        Ok(result)
    }

    /// Spawn the sweep as a background task running at the configured
    /// interval until the handle is aborted
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(
                self.config.interval_seconds.max(1),
            ));
            loop {
                interval.tick().await;
                if let Err(e) = self.run_cleanup().await {
                    error!("Maintenance sweep failed: {}", e);
                }
            }
        })
    }
}
