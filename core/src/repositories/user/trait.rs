//! User repository trait defining the interface for account persistence.
//!
//! This module defines the repository pattern interface for User entities.
//! The trait is async-first and uses Result types for proper error handling.
//! Implementations must keep each operation atomic per account: the
//! lockout counters and the refresh-token set are mutated under concurrent
//! requests for the same account, and a lost update there either weakens
//! the lockout or resurrects a consumed refresh token. Implementations are
//! also expected to bound their I/O and surface timeouts as
//! `DomainError::Internal`; the core never retries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use se_core::repositories::UserRepository;
/// use se_core::domain::entities::user::User;
/// use se_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// # #[async_trait]
/// # impl UserRepository for MySqlUserRepository {
/// #     async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
/// #         unimplemented!()
/// #     }
/// #     async fn find_by_id_and_refresh_token(
/// #         &self,
/// #         _id: uuid::Uuid,
/// #         _token: &str,
/// #     ) -> Result<Option<User>, DomainError> {
/// #         unimplemented!()
/// #     }
/// #     async fn create(&self, _user: User) -> Result<User, DomainError> {
/// #         unimplemented!()
/// #     }
/// #     async fn save(&self, _user: User) -> Result<User, DomainError> {
/// #         unimplemented!()
/// #     }
/// #     async fn remove_refresh_token(
/// #         &self,
/// #         _id: uuid::Uuid,
/// #         _token: &str,
/// #     ) -> Result<bool, DomainError> {
/// #         unimplemented!()
/// #     }
/// #     async fn rotate_refresh_token(
/// #         &self,
/// #         _id: uuid::Uuid,
/// #         _old_token: &str,
/// #         _new_record: se_core::domain::entities::token::RefreshTokenRecord,
/// #     ) -> Result<bool, DomainError> {
/// #         unimplemented!()
/// #     }
/// #     async fn clear_expired_locks(
/// #         &self,
/// #         _now: chrono::DateTime<chrono::Utc>,
/// #     ) -> Result<usize, DomainError> {
/// #         unimplemented!()
/// #     }
/// #     async fn purge_expired_refresh_tokens(
/// #         &self,
/// #         _now: chrono::DateTime<chrono::Utc>,
/// #     ) -> Result<usize, DomainError> {
/// #         unimplemented!()
/// #     }
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their normalized email address
    ///
    /// # Arguments
    /// * `email` - Lowercased, trimmed email (the caller normalizes)
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered under this email
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find the user holding a specific refresh token
    ///
    /// Matches only when the account with `id` currently has a
    /// refresh-token record whose value equals `token` exactly. A token
    /// that was already rotated or revoked therefore yields `None`.
    ///
    /// # Arguments
    /// * `id` - The account UUID encoded in the token
    /// * `token` - The exact refresh token value
    async fn find_by_id_and_refresh_token(
        &self,
        id: Uuid,
        token: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist the full mutated state of an existing user
    ///
    /// Must replace the stored account atomically; partial writes of the
    /// lockout fields or the refresh-token set are not acceptable.
    ///
    /// # Returns
    /// * `Ok(User)` - The saved user
    /// * `Err(DomainError)` - User not found or store error
    async fn save(&self, user: User) -> Result<User, DomainError>;

    /// Remove a single refresh-token record from an account
    ///
    /// Idempotent: removing a token that is not present succeeds.
    ///
    /// # Returns
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - No matching record existed
    async fn remove_refresh_token(&self, id: Uuid, token: &str) -> Result<bool, DomainError>;

    /// Atomically replace one refresh-token record with another
    ///
    /// Removes the record holding `old_token` and appends `new_record` in a
    /// single step. When `old_token` is no longer present (already rotated
    /// by a concurrent request, or revoked), nothing is appended and the
    /// call returns `Ok(false)` so exactly one of two racing rotations can
    /// win.
    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        old_token: &str,
        new_record: RefreshTokenRecord,
    ) -> Result<bool, DomainError>;

    /// Clear `lock_until` timestamps that have already passed
    ///
    /// Pure hygiene for the maintenance sweep: an elapsed lock no longer
    /// refuses logins either way. Failed-attempt counters are left alone;
    /// only a successful login resets them.
    ///
    /// # Returns
    /// * `Ok(count)` - Number of accounts whose stale lock was cleared
    async fn clear_expired_locks(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Delete refresh-token records whose expiry has passed
    ///
    /// # Returns
    /// * `Ok(count)` - Number of records removed across all accounts
    async fn purge_expired_refresh_tokens(&self, now: DateTime<Utc>)
        -> Result<usize, DomainError>;
}
