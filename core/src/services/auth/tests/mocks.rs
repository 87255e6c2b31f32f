//! Mock implementations for testing the authentication service

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::UserRepository;

pub struct MockUserRepository {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_existing_user(user: User) -> Self {
        let repo = Self::new();
        repo.users.lock().unwrap().push(user);
        repo
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id_and_refresh_token(
        &self,
        id: Uuid,
        token: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.id == id && u.has_refresh_token(token))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
            Ok(user)
        } else {
            Err(DomainError::NotFound {
                resource: "User".to_string(),
            })
        }
    }

    async fn remove_refresh_token(&self, id: Uuid, token: &str) -> Result<bool, DomainError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
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
        let mut users = self.users.lock().unwrap();
        let user = match users.iter_mut().find(|u| u.id == id) {
            Some(user) => user,
            None => return Ok(false),
        };
        if !user.remove_refresh_token(old_token) {
            return Ok(false);
        }
        user.push_refresh_token(new_record);
        Ok(true)
    }

    async fn clear_expired_locks(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut users = self.users.lock().unwrap();
        let mut cleared = 0;
        for user in users.iter_mut() {
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
        let mut users = self.users.lock().unwrap();
        let mut purged = 0;
        for user in users.iter_mut() {
            let before = user.refresh_tokens.len();
            user.refresh_tokens.retain(|record| record.expires_at > now);
            purged += before - user.refresh_tokens.len();
        }
        Ok(purged)
    }
}

/// Repository whose every call fails, for exercising the server-error path
pub struct FailingUserRepository;

impl FailingUserRepository {
    fn store_down<T>() -> Result<T, DomainError> {
        Err(DomainError::Internal {
            message: "store unavailable".to_string(),
        })
    }
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
        Self::store_down()
    }

    async fn find_by_id_and_refresh_token(
        &self,
        _id: Uuid,
        _token: &str,
    ) -> Result<Option<User>, DomainError> {
        Self::store_down()
    }

    async fn create(&self, _user: User) -> Result<User, DomainError> {
        Self::store_down()
    }

    async fn save(&self, _user: User) -> Result<User, DomainError> {
        Self::store_down()
    }

    async fn remove_refresh_token(&self, _id: Uuid, _token: &str) -> Result<bool, DomainError> {
        Self::store_down()
    }

    async fn rotate_refresh_token(
        &self,
        _id: Uuid,
        _old_token: &str,
        _new_record: RefreshTokenRecord,
    ) -> Result<bool, DomainError> {
        Self::store_down()
    }

    async fn clear_expired_locks(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Self::store_down()
    }

    async fn purge_expired_refresh_tokens(
        &self,
        _now: DateTime<Utc>,
    ) -> Result<usize, DomainError> {
        Self::store_down()
    }
}
