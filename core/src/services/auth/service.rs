//! Main authentication service implementation

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use se_shared::utils::validation::{is_valid_email, normalize_email};

use crate::domain::entities::user::{AccountStatus, User};
use crate::domain::value_objects::{
    ClientContext, LoginResponse, LogoutResponse, RefreshResponse, UserProfile,
};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// Authentication service for credential verification and lockout tracking
///
/// Login is the only path that moves the lockout counters: each failed
/// password increments `failed_login_attempts`, the attempt that reaches
/// the threshold engages `lock_until`, and a successful login clears both.
/// The administrator-set block is checked here but never written here.
pub struct AuthService<U: UserRepository> {
    /// User repository for account persistence
    user_repository: Arc<U>,
    /// Token service for session issuance
    token_service: Arc<TokenService<U>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U: UserRepository> AuthService<U> {
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for account persistence
    /// * `token_service` - Service for JWT token management
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<U>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            config,
        }
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Validates that name, email, and password are present
    /// 2. Validates the email format and normalizes it
    /// 3. Rejects an email that is already registered
    /// 4. Hashes the password and creates the account with zeroed
    ///    lockout state
    ///
    /// # Returns
    ///
    /// * `Ok(UserProfile)` - Safe projection of the created account
    /// * `Err(DomainError)` - Validation failure, duplicate email, or
    ///   store error
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<UserProfile> {
        if name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }
        if email.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if password.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }
            .into());
        }

        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = self.hash_password(password)?;
        let user = User::new(name.trim(), &email, password_hash);
        let created = self.user_repository.create(user).await?;

        info!(user_id = %created.id, "New account registered");
        Ok(UserProfile::from_user(&created))
    }

    /// Authenticate a user and issue a token pair
    ///
    /// This method:
    /// 1. Fails fast when email or password is missing
    /// 2. Looks up the account by normalized email; an unknown email gets
    ///    the same generic error as a wrong password
    /// 3. Refuses blocked accounts outright
    /// 4. Refuses locked accounts, reporting the minutes remaining
    /// 5. Verifies the password against the stored bcrypt hash
    /// 6. On mismatch, increments the failure counter, engaging the lock
    ///    at the threshold; the locking attempt itself still reports
    ///    invalid credentials so the lock takes effect on the next request
    /// 7. On match, resets the lockout state, mints a token pair for the
    ///    device, and persists everything in one save
    ///
    /// # Arguments
    ///
    /// * `email` - Account email
    /// * `password` - Plaintext password to verify
    /// * `ctx` - Client context labelling the device session
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResponse)` - Tokens plus the safe user projection
    /// * `Err(DomainError)` - Validation, credential, lockout, or store
    ///   failure
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ctx: &ClientContext,
    ) -> DomainResult<LoginResponse> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ValidationError::MissingCredentials.into());
        }

        let email = normalize_email(email);
        let mut user = match self.user_repository.find_by_email(&email).await? {
            Some(user) => user,
            // Same error as a wrong password so probes cannot tell whether
            // the email is registered
            None => {
                return Err(AuthError::InvalidCredentials {
                    attempts_left: None,
                    locked: false,
                }
                .into())
            }
        };

        let now = Utc::now();
        match user.status_at(now) {
            AccountStatus::Blocked => {
                warn!(user_id = %user.id, "Login attempt on blocked account");
                return Err(AuthError::AccountBlocked.into());
            }
            AccountStatus::Locked => {
                return Err(AuthError::AccountLocked {
                    minutes: user.lock_remaining_minutes(now),
                }
                .into());
            }
            AccountStatus::Active => {}
        }

        if !self.verify_password(password, &user.password_hash)? {
            let attempts = user
                .record_failed_attempt(self.config.max_failed_attempts(), self.config.lock_duration());
            let locked = user.lock_until.is_some();
            let attempts_left = self.config.max_failed_attempts().saturating_sub(attempts);

            let user = self.user_repository.save(user).await?;
            warn!(
                user_id = %user.id,
                attempts,
                attempts_left,
                locked,
                "Failed login attempt"
            );

            return Err(AuthError::InvalidCredentials {
                attempts_left: Some(attempts_left),
                locked,
            }
            .into());
        }

        user.reset_lockout();
        let token_pair = self
            .token_service
            .issue_token_pair(&mut user, ctx.device_label())?;
        let user = self.user_repository.save(user).await?;

        info!(user_id = %user.id, device = ctx.device_label(), "Login successful");
        Ok(LoginResponse::new(token_pair, &user))
    }

    /// Redeem a refresh token for a new pair
    ///
    /// Delegates to the token service, which verifies, rotates, and
    /// persists the replacement record.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
        ctx: &ClientContext,
    ) -> DomainResult<RefreshResponse> {
        if refresh_token.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "refreshToken".to_string(),
            }
            .into());
        }

        let token_pair = self.token_service.refresh(refresh_token, ctx).await?;
        Ok(RefreshResponse::new(token_pair))
    }

    /// Log out an authenticated caller's device session
    ///
    /// Removes the presented refresh token from the account. Idempotent:
    /// an absent token still yields the success response. Access tokens
    /// already issued simply age out.
    pub async fn logout(&self, user_id: Uuid, refresh_token: &str) -> DomainResult<LogoutResponse> {
        if !refresh_token.is_empty() {
            self.token_service.revoke(user_id, refresh_token).await?;
        }

        info!(user_id = %user_id, "Logged out");
        Ok(LogoutResponse::new())
    }

    /// Hash a plaintext password for storage
    fn hash_password(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.config.bcrypt_cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    /// Compare a plaintext password against a stored hash
    fn verify_password(&self, password: &str, password_hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, password_hash).map_err(|e| DomainError::Internal {
            message: format!("Password verification failed: {}", e),
        })
    }
}
