//! In-memory implementation of the user repository.
//!
//! Backs the test suites and local development. A single `RwLock` write
//! guard spans every read-modify-write, which gives each operation the
//! per-account atomicity the trait demands.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// In-memory user repository
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a repository pre-populated with a user
    pub async fn with_user(user: User) -> Self {
        let repo = Self::new();
        repo.users.write().await.insert(user.id, user);
        repo
    }

    /// Fetch a snapshot of a stored user, mainly for assertions in tests
    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id_and_refresh_token(
        &self,
        id: Uuid,
        token: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .get(&id)
            .filter(|u| u.has_refresh_token(token))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn remove_refresh_token(&self, id: Uuid, token: &str) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => Ok(user.remove_refresh_token(token)),
            None => Ok(false),
        }
    }

    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        old_token: &str,
        new_record: RefreshTokenRecord,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        let user = match users.get_mut(&id) {
            Some(user) => user,
            None => return Ok(false),
        };

        // Pull-then-push under one guard: a concurrent rotation of the same
        // token sees the pull fail and loses the race
        if !user.remove_refresh_token(old_token) {
            return Ok(false);
        }
        user.push_refresh_token(new_record);
        Ok(true)
    }

    async fn clear_expired_locks(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut users = self.users.write().await;
        let mut cleared = 0;
        for user in users.values_mut() {
            if matches!(user.lock_until, Some(until) if until <= now) {
                user.lock_until = None;
                cleared += 1;
            }
        }
        Ok(cleared)
    }

    async fn purge_expired_refresh_tokens(
        &self,
        now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        let mut users = self.users.write().await;
        let mut purged = 0;
        for user in users.values_mut() {
            let before = user.refresh_tokens.len();
            user.refresh_tokens.retain(|record| record.expires_at > now);
            purged += before - user.refresh_tokens.len();
        }
        Ok(purged)
    }
}
