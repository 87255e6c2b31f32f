//! End-to-end flow tests exercising the public crate API the way the
//! transport layer drives it: register, login, refresh, logout.

use std::sync::Arc;

use se_core::domain::value_objects::ClientContext;
use se_core::errors::{DomainError, ErrorResponse, TokenError};
use se_core::repositories::InMemoryUserRepository;
use se_core::services::{AuthService, AuthServiceConfig, TokenService, TokenServiceConfig};

fn build_stack() -> (
    AuthService<InMemoryUserRepository>,
    Arc<TokenService<InMemoryUserRepository>>,
    Arc<InMemoryUserRepository>,
) {
    let repository = Arc::new(InMemoryUserRepository::new());
    let token_service = Arc::new(TokenService::new(
        Arc::clone(&repository),
        TokenServiceConfig::default(),
    ));
    let auth_service = AuthService::new(
        Arc::clone(&repository),
        Arc::clone(&token_service),
        AuthServiceConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
    );
    (auth_service, token_service, repository)
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let (auth, tokens, repository) = build_stack();
    let ctx = ClientContext::new("integration-test");

    // Register and log in
    let profile = auth
        .register("Carol", "carol@example.com", "correct horse")
        .await
        .unwrap();
    let login = auth
        .login("carol@example.com", "correct horse", &ctx)
        .await
        .unwrap();
    assert_eq!(login.user.id, profile.id);

    // Refresh rotates the session; the new access token still belongs to Carol
    let refreshed = auth.refresh_token(&login.refresh_token, &ctx).await.unwrap();
    let claims = tokens.verify_access_token(&refreshed.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap(), profile.id);

    // The redeemed refresh token is dead
    let replay = auth.refresh_token(&login.refresh_token, &ctx).await;
    assert!(matches!(
        replay,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));

    // Logout removes the rotated session, then refreshing it fails too
    let logout = auth.logout(profile.id, &refreshed.refresh_token).await.unwrap();
    assert!(logout.success);
    assert!(repository
        .get(profile.id)
        .await
        .unwrap()
        .refresh_tokens
        .is_empty());

    let after_logout = auth.refresh_token(&refreshed.refresh_token, &ctx).await;
    assert!(after_logout.is_err());
}

#[tokio::test]
async fn test_lockout_flow_over_the_public_api() {
    let (auth, _, _) = build_stack();
    let ctx = ClientContext::default();

    auth.register("Dave", "dave@example.com", "right-password")
        .await
        .unwrap();

    // Two bad passwords burn attempts, the third locks
    for expected_left in [2u32, 1] {
        let err = auth
            .login("dave@example.com", "bad-password", &ctx)
            .await
            .err()
            .unwrap();
        let body = ErrorResponse::from(&err);
        assert_eq!(body.attempts_left, Some(expected_left));
        assert_eq!(body.locked, None);
    }

    let third = auth
        .login("dave@example.com", "bad-password", &ctx)
        .await
        .err()
        .unwrap();
    let body = ErrorResponse::from(&third);
    assert_eq!(body.error, "invalid_credentials");
    assert_eq!(body.attempts_left, Some(0));
    assert_eq!(body.locked, Some(true));

    // The correct password is refused while the lock holds
    let locked_out = auth
        .login("dave@example.com", "right-password", &ctx)
        .await
        .err()
        .unwrap();
    let body = ErrorResponse::from(&locked_out);
    assert_eq!(body.error, "account_locked");
    assert!(body.message.contains("minute(s)"));
}

#[tokio::test]
async fn test_two_devices_hold_independent_sessions() {
    let (auth, _, repository) = build_stack();

    auth.register("Erin", "erin@example.com", "pw-for-erin")
        .await
        .unwrap();

    let phone_ctx = ClientContext::new("phone");
    let laptop_ctx = ClientContext::new("laptop");
    let phone = auth
        .login("erin@example.com", "pw-for-erin", &phone_ctx)
        .await
        .unwrap();
    let laptop = auth
        .login("erin@example.com", "pw-for-erin", &laptop_ctx)
        .await
        .unwrap();

    let stored = repository.get(phone.user.id).await.unwrap();
    assert_eq!(stored.refresh_tokens.len(), 2);

    // Phone logout leaves the laptop session refreshable
    auth.logout(phone.user.id, &phone.refresh_token).await.unwrap();
    let refreshed = auth.refresh_token(&laptop.refresh_token, &laptop_ctx).await;
    assert!(refreshed.is_ok());
}
