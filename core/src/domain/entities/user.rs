//! User entity representing a registered storefront account.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use se_shared::utils::validation::normalize_email;

use super::token::RefreshTokenRecord;

/// Account standing derived from the blocking and lockout fields
///
/// `Blocked` is administrator-set and overrides everything else. `Locked`
/// is the temporary state engaged after repeated failed logins and expires
/// on its own once `lock_until` passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    /// Login may proceed to credential verification
    Active,
    /// Temporarily locked out after repeated failures
    Locked,
    /// Blocked by an administrator until externally unset
    Blocked,
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Primary lookup key; stored trimmed and lowercased
    pub email: String,

    /// Bcrypt hash of the credential, never the plaintext
    pub password_hash: String,

    /// Administrator-set block, independent of the lockout counters
    pub is_blocked: bool,

    /// Consecutive failed login attempts since the last success
    pub failed_login_attempts: u32,

    /// When set and in the future, login is refused outright
    pub lock_until: Option<DateTime<Utc>>,

    /// One record per logged-in device session
    pub refresh_tokens: Vec<RefreshTokenRecord>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance with zeroed lockout state
    pub fn new(
        name: impl Into<String>,
        email: &str,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: normalize_email(email),
            password_hash: password_hash.into(),
            is_blocked: false,
            failed_login_attempts: 0,
            lock_until: None,
            refresh_tokens: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Computes the account standing at `now`
    ///
    /// Every call site that needs to gate on blocking or lockout goes
    /// through this single function instead of re-deriving the conditions.
    pub fn status_at(&self, now: DateTime<Utc>) -> AccountStatus {
        if self.is_blocked {
            return AccountStatus::Blocked;
        }
        match self.lock_until {
            Some(until) if until > now => AccountStatus::Locked,
            _ => AccountStatus::Active,
        }
    }

    /// Whether the temporary lockout is currently in effect
    pub fn is_locked(&self) -> bool {
        self.status_at(Utc::now()) == AccountStatus::Locked
    }

    /// Minutes until the lock expires, rounded up; zero when not locked
    pub fn lock_remaining_minutes(&self, now: DateTime<Utc>) -> i64 {
        match self.lock_until {
            Some(until) if until > now => {
                let remaining_ms = (until - now).num_milliseconds();
                (remaining_ms + 59_999) / 60_000
            }
            _ => 0,
        }
    }

    /// Records a failed login attempt, engaging the lock once the count
    /// reaches `max_attempts`. Returns the new attempt count.
    pub fn record_failed_attempt(&mut self, max_attempts: u32, lock_duration: Duration) -> u32 {
        self.failed_login_attempts += 1;
        if self.failed_login_attempts >= max_attempts {
            self.lock_until = Some(Utc::now() + lock_duration);
        }
        self.updated_at = Utc::now();
        self.failed_login_attempts
    }

    /// Clears the lockout state after a successful login
    pub fn reset_lockout(&mut self) {
        self.failed_login_attempts = 0;
        self.lock_until = None;
        self.updated_at = Utc::now();
    }

    /// Blocks the account (administrative action)
    pub fn block(&mut self) {
        self.is_blocked = true;
        self.updated_at = Utc::now();
    }

    /// Unblocks the account (administrative action)
    pub fn unblock(&mut self) {
        self.is_blocked = false;
        self.updated_at = Utc::now();
    }

    /// Appends a refresh-token record for a new device session
    pub fn push_refresh_token(&mut self, record: RefreshTokenRecord) {
        self.refresh_tokens.push(record);
        self.updated_at = Utc::now();
    }

    /// Removes the record holding `token`, returning whether one was present
    pub fn remove_refresh_token(&mut self, token: &str) -> bool {
        let before = self.refresh_tokens.len();
        self.refresh_tokens.retain(|record| record.token != token);
        if self.refresh_tokens.len() != before {
            self.updated_at = Utc::now();
            true
        } else {
            false
        }
    }

    /// Checks whether a refresh-token record with this exact value exists
    pub fn has_refresh_token(&self, token: &str) -> bool {
        self.refresh_tokens.iter().any(|record| record.token == token)
    }
}
