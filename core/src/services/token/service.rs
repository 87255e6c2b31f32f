//! Main token service implementation

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::token::{
    Claims, RefreshTokenRecord, TokenPair, JWT_AUDIENCE, JWT_ISSUER,
};
use crate::domain::entities::user::User;
use crate::domain::value_objects::ClientContext;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::UserRepository;

use super::config::TokenServiceConfig;

/// Service for minting, rotating, and revoking JWT token pairs
///
/// Access tokens are stateless and never persisted; refresh tokens are
/// additionally stored as records on the owning account so each one can be
/// revoked individually and redeemed at most once.
pub struct TokenService<R: UserRepository> {
    repository: Arc<R>,
    config: TokenServiceConfig,
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: UserRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Account store holding the refresh-token records
    /// * `config` - Token service configuration
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        let access_encoding_key = EncodingKey::from_secret(config.access_secret.as_bytes());
        let access_decoding_key = DecodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_encoding_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding_key = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            repository,
            config,
            access_encoding_key,
            access_decoding_key,
            refresh_encoding_key,
            refresh_decoding_key,
            validation,
        }
    }

    /// Mints a token pair and appends the refresh record to the account
    ///
    /// The caller persists the account afterwards, so a login writes the
    /// cleared lockout counters and the new session in one store round trip.
    ///
    /// # Arguments
    ///
    /// * `user` - The account receiving the session
    /// * `device` - Device label stored on the refresh record
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The freshly signed access and refresh tokens
    /// * `Err(DomainError)` - Token generation failed
    pub fn issue_token_pair(&self, user: &mut User, device: &str) -> DomainResult<TokenPair> {
        let (pair, record) = self.mint_pair(user.id, device)?;
        user.push_refresh_token(record);
        Ok(pair)
    }

    /// Redeems a refresh token for a new pair, rotating the stored record
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - The refresh token presented by the client
    /// * `ctx` - Client context labelling the rotated session
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - New token pair; the redeemed token is now dead
    /// * `Err(DomainError)` - Signature, expiry, or rotation failure
    pub async fn refresh(
        &self,
        refresh_token: &str,
        ctx: &ClientContext,
    ) -> DomainResult<TokenPair> {
        let claims = self.decode_refresh_token(refresh_token)?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidRefreshToken))?;

        // The token must still be live in the store: a valid signature on a
        // rotated or revoked token gets the same answer as a forgery
        let user = self
            .repository
            .find_by_id_and_refresh_token(user_id, refresh_token)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        let (pair, record) = self.mint_pair(user.id, ctx.device_label())?;

        let rotated = self
            .repository
            .rotate_refresh_token(user.id, refresh_token, record)
            .await?;
        if !rotated {
            // A concurrent refresh consumed the token between lookup and
            // rotation; treat the loser like a replay
            warn!(user_id = %user.id, "refresh token already rotated");
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        Ok(pair)
    }

    /// Removes a single refresh-token record (logout)
    ///
    /// Idempotent: revoking a token that is already gone succeeds. Access
    /// tokens issued earlier stay valid until they expire on their own.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - No matching record existed
    pub async fn revoke(&self, user_id: Uuid, refresh_token: &str) -> DomainResult<bool> {
        let removed = self
            .repository
            .remove_refresh_token(user_id, refresh_token)
            .await?;
        Ok(removed)
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Arguments
    ///
    /// * `token` - The JWT access token to verify
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(DomainError)` - Token is invalid, expired, or malformed
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.access_decoding_key, &self.validation)
            .map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    DomainError::Token(TokenError::TokenExpired)
                } else if e.kind() == &jsonwebtoken::errors::ErrorKind::ImmatureSignature {
                    DomainError::Token(TokenError::TokenNotYetValid)
                } else {
                    DomainError::Token(TokenError::InvalidTokenFormat)
                }
            })?;

        Ok(token_data.claims)
    }

    /// Signs both tokens and builds the refresh record to store
    fn mint_pair(
        &self,
        user_id: Uuid,
        device: &str,
    ) -> DomainResult<(TokenPair, RefreshTokenRecord)> {
        let access_ttl = Duration::minutes(self.config.access_token_expiry_minutes);
        let refresh_ttl = Duration::days(self.config.refresh_token_expiry_days);

        let access_claims = Claims::access_token(user_id, access_ttl);
        let access_token = self.encode_jwt(&access_claims, &self.access_encoding_key)?;

        let refresh_claims = Claims::refresh_token(user_id, refresh_ttl);
        let refresh_token = self.encode_jwt(&refresh_claims, &self.refresh_encoding_key)?;

        let record = RefreshTokenRecord::expiring_at(
            refresh_token.clone(),
            device.to_string(),
            Utc::now() + refresh_ttl,
        );

        let pair = TokenPair::new(
            access_token,
            refresh_token,
            access_ttl.num_seconds(),
            refresh_ttl.num_seconds(),
        );

        Ok((pair, record))
    }

    /// Verifies a refresh token signature and expiry
    fn decode_refresh_token(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.refresh_decoding_key, &self.validation)
            .map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    DomainError::Token(TokenError::RefreshTokenExpired)
                } else {
                    DomainError::Token(TokenError::InvalidRefreshToken)
                }
            })?;

        Ok(token_data.claims)
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims, key: &EncodingKey) -> DomainResult<String> {
        encode(&Header::default(), claims, key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}
