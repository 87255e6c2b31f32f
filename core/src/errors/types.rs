//! Domain-specific error types for authentication and token operations
//!
//! Every variant maps onto a stable transport error code via the
//! `ErrorResponse` conversions at the bottom of this module. The HTTP layer
//! decides status codes; the core only decides codes and messages.

use se_shared::types::response::ErrorResponse;
use thiserror::Error;

use super::DomainError;

/// Authentication-related errors
///
/// Credential and lockout failures never reveal whether an email is
/// registered; the generic invalid-credentials message covers both an
/// unknown account and a wrong password.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials {
        /// Attempts remaining before lockout; absent when the account is
        /// unknown so probes learn nothing from the shape of the error
        attempts_left: Option<u32>,
        /// Whether this failure engaged the lock
        locked: bool,
    },

    #[error("Your account is blocked. Please contact support.")]
    AccountBlocked,

    #[error("Account locked due to too many failed attempts. Try again in {minutes} minute(s).")]
    AccountLocked { minutes: i64 },

    #[error("Email already exists")]
    UserAlreadyExists,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidTokenFormat,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Email and password required")]
    MissingCredentials,

    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,
}

/// Convert AuthError to the transport failure body
impl From<&AuthError> for ErrorResponse {
    fn from(err: &AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials {
                attempts_left,
                locked,
            } => {
                // A failure that just engaged the lock keeps the
                // invalid-credentials code but tells the user about the lock
                let mut response = if *locked {
                    ErrorResponse::new(
                        "invalid_credentials",
                        "Account locked due to too many failed attempts. Try again in 5 minutes.",
                    )
                    .with_locked()
                } else {
                    ErrorResponse::new("invalid_credentials", err.to_string())
                };
                if let Some(attempts_left) = attempts_left {
                    response = response.with_attempts_left(*attempts_left);
                }
                response
            }
            AuthError::AccountBlocked => ErrorResponse::new("account_blocked", err.to_string()),
            AuthError::AccountLocked { .. } => {
                ErrorResponse::new("account_locked", err.to_string())
            }
            AuthError::UserAlreadyExists => ErrorResponse::new("email_exists", err.to_string()),
        }
    }
}

/// Convert TokenError to the transport failure body
impl From<&TokenError> for ErrorResponse {
    fn from(err: &TokenError) -> Self {
        let error_code = match err {
            TokenError::RefreshTokenExpired => "refresh_expired",
            TokenError::InvalidRefreshToken => "refresh_invalid",
            TokenError::TokenExpired => "token_expired",
            TokenError::InvalidTokenFormat
            | TokenError::TokenNotYetValid
            | TokenError::TokenGenerationFailed => "token_invalid",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert ValidationError to the transport failure body
impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        ErrorResponse::new("validation_error", err.to_string())
    }
}

/// Convert any domain error to the transport failure body
///
/// Infrastructure failures collapse to a generic server error; their detail
/// is for logs only and never reaches the caller.
impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Auth(auth_err) => auth_err.into(),
            DomainError::Token(token_err) => token_err.into(),
            DomainError::ValidationErr(validation_err) => validation_err.into(),
            DomainError::NotFound { .. } | DomainError::Internal { .. } => {
                ErrorResponse::new("server_error", "Server error")
            }
        }
    }
}
