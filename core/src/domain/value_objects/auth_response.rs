//! Authentication response value objects for the transport layer.
//!
//! Field names serialize in camelCase to match the public wire contract.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;

/// Safe projection of a user returned to clients
///
/// Never carries the password hash or the lockout bookkeeping fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Account email address
    pub email: String,

    /// Display name
    pub name: String,
}

impl UserProfile {
    /// Creates a profile from a user entity
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// Response returned after a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Always `true`
    pub success: bool,

    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining new token pairs
    pub refresh_token: String,

    /// Safe projection of the authenticated user
    pub user: UserProfile,
}

impl LoginResponse {
    /// Creates a login response from a token pair and the authenticated user
    pub fn new(token_pair: TokenPair, user: &User) -> Self {
        Self {
            success: true,
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            user: UserProfile::from_user(user),
        }
    }
}

/// Response returned after a successful token refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Always `true`
    pub success: bool,

    /// Newly minted JWT access token
    pub access_token: String,

    /// Newly minted JWT refresh token replacing the redeemed one
    pub refresh_token: String,
}

impl RefreshResponse {
    /// Creates a refresh response from a rotated token pair
    pub fn new(token_pair: TokenPair) -> Self {
        Self {
            success: true,
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
        }
    }
}

/// Response returned after logout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Always `true`; logout is idempotent
    pub success: bool,

    /// Confirmation message
    pub message: String,
}

impl LogoutResponse {
    /// Creates the standard logout confirmation
    pub fn new() -> Self {
        Self {
            success: true,
            message: "Logged out successfully".to_string(),
        }
    }
}

impl Default for LogoutResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_profile_omits_password_hash() {
        let user = User::new("Alice", "alice@example.com", "$2b$08$secret-hash");
        let profile = UserProfile::from_user(&user);

        let json = serde_json::to_string(&profile).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password"));
        assert!(json.contains("alice@example.com"));
    }

    #[test]
    fn test_login_response_serializes_camel_case() {
        let user = User::new("Alice", "alice@example.com", "hash");
        let pair = TokenPair::new("access".into(), "refresh".into(), 900, 604_800);
        let response = LoginResponse::new(pair, &user);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["accessToken"], "access");
        assert_eq!(json["refreshToken"], "refresh");
        assert_eq!(json["user"]["email"], "alice@example.com");
    }

    #[test]
    fn test_logout_response_message() {
        let response = LogoutResponse::new();
        assert!(response.success);
        assert_eq!(response.message, "Logged out successfully");
    }
}
