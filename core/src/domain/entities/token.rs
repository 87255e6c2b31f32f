//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "shop-easy";

/// JWT audience
pub const JWT_AUDIENCE: &str = "shop-easy-api";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    fn new(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Creates new claims for an access token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `ttl` - Access token lifetime
    pub fn access_token(user_id: Uuid, ttl: Duration) -> Self {
        Self::new(user_id, ttl)
    }

    /// Creates new claims for a refresh token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `ttl` - Refresh token lifetime
    pub fn refresh_token(user_id: Uuid, ttl: Duration) -> Self {
        Self::new(user_id, ttl)
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Checks if the claims are valid (not expired and after nbf)
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh-token record stored on the account
///
/// One record per logged-in device session. The token value itself is the
/// lookup key; a record is removed exactly once, when the token is rotated
/// or revoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// The refresh token value
    pub token: String,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Free-text device label, typically the client user agent
    pub device: String,
}

impl RefreshTokenRecord {
    /// Creates a new record with the default refresh lifetime
    pub fn new(token: String, device: String) -> Self {
        Self::expiring_at(token, device, Utc::now() + Duration::days(REFRESH_TOKEN_EXPIRY_DAYS))
    }

    /// Creates a new record with an explicit expiry
    pub fn expiring_at(token: String, device: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            expires_at,
            device,
        }
    }

    /// Checks if the record has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::access_token(user_id, Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES));

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert!(claims.is_valid());
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_MINUTES * 60);
    }

    #[test]
    fn test_refresh_token_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::refresh_token(user_id, Duration::days(REFRESH_TOKEN_EXPIRY_DAYS));

        assert_eq!(claims.exp - claims.iat, REFRESH_TOKEN_EXPIRY_DAYS * 86_400);
        assert!(claims.is_valid());
    }

    #[test]
    fn test_claims_user_id_parsing() {
        let user_id = Uuid::new_v4();
        let claims = Claims::access_token(user_id, Duration::minutes(15));

        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_claims_expiration() {
        let user_id = Uuid::new_v4();
        let mut claims = Claims::access_token(user_id, Duration::minutes(15));

        claims.exp = Utc::now().timestamp() - 1;

        assert!(claims.is_expired());
        assert!(!claims.is_valid());
    }

    #[test]
    fn test_refresh_token_record_expiry() {
        let record = RefreshTokenRecord::new("token-value".to_string(), "web".to_string());
        assert!(!record.is_expired());

        let expired = RefreshTokenRecord::expiring_at(
            "old-token".to_string(),
            "web".to_string(),
            Utc::now() - Duration::days(1),
        );
        assert!(expired.is_expired());
    }

    #[test]
    fn test_token_pair_creation() {
        let pair = TokenPair::new(
            "access_token_jwt".to_string(),
            "refresh_token_jwt".to_string(),
            ACCESS_TOKEN_EXPIRY_MINUTES * 60,
            REFRESH_TOKEN_EXPIRY_DAYS * 86_400,
        );

        assert_eq!(pair.access_expires_in, 900);
        assert_eq!(pair.refresh_expires_in, 604_800);
    }

    #[test]
    fn test_claims_serialization() {
        let claims = Claims::access_token(Uuid::new_v4(), Duration::minutes(15));

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }
}
