//! Tests for the account service session and profile flows

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::account::{AccountService, AccountServiceConfig, ProfileUpdate, Registration};
use crate::services::media::{MediaUpload, MockMediaStore};
use crate::services::token::{TokenConfig, TokenService};

type TestService = AccountService<MockUserRepository, MockMediaStore>;

struct TestContext {
    service: TestService,
    users: Arc<MockUserRepository>,
    media: Arc<MockMediaStore>,
}

fn test_context() -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let media = Arc::new(MockMediaStore::new());
    let tokens = Arc::new(
        TokenService::new(TokenConfig {
            access_secret: "access-test-secret".to_string(),
            refresh_secret: "refresh-test-secret".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 864_000,
            issuer: "clipstream".to_string(),
            audience: "clipstream-api".to_string(),
        })
        .unwrap(),
    );

    TestContext {
        service: AccountService::new(
            users.clone(),
            media.clone(),
            tokens,
            AccountServiceConfig::for_tests(),
        ),
        users,
        media,
    }
}

fn registration(username: &str, email: &str) -> Registration {
    Registration {
        full_name: "Alice Doe".to_string(),
        email: email.to_string(),
        username: username.to_string(),
        password: "alice123".to_string(),
    }
}

fn avatar_upload() -> MediaUpload {
    let mut upload = MediaUpload::new(vec![0xFF, 0xD8, 0xFF]);
    upload.filename = Some("avatar.jpg".to_string());
    upload.content_type = Some("image/jpeg".to_string());
    upload
}

async fn register_alice(ctx: &TestContext) -> User {
    ctx.service
        .register(registration("Alice", "a@x.com"), avatar_upload(), None)
        .await
        .unwrap()
}

// ---- registration ----

#[tokio::test]
async fn test_register_hashes_password_and_normalizes_username() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;

    assert_eq!(user.username, "alice");
    assert_ne!(user.password_hash, "alice123");
    assert!(user.password_hash.starts_with("$2"));
    assert!(user.refresh_token.is_none());
    assert!(user.avatar_url.starts_with("https://media.test/"));
    assert_eq!(ctx.media.upload_count(), 1);
}

#[tokio::test]
async fn test_register_with_cover_image() {
    let ctx = test_context();
    let mut cover = MediaUpload::new(vec![1, 2, 3]);
    cover.filename = Some("cover.png".to_string());

    let user = ctx
        .service
        .register(registration("bob", "b@x.com"), avatar_upload(), Some(cover))
        .await
        .unwrap();

    assert!(user.cover_image_url.is_some());
    assert_eq!(ctx.media.upload_count(), 2);
}

#[tokio::test]
async fn test_register_rejects_blank_fields() {
    let ctx = test_context();
    let mut reg = registration("alice", "a@x.com");
    reg.password = "   ".to_string();

    let err = ctx
        .service
        .register(reg, avatar_upload(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));
}

#[tokio::test]
async fn test_register_rejects_missing_avatar() {
    let ctx = test_context();

    let err = ctx
        .service
        .register(registration("alice", "a@x.com"), MediaUpload::new(vec![]), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));
    assert_eq!(ctx.media.upload_count(), 0);
}

#[tokio::test]
async fn test_register_rejects_duplicate_account() {
    let ctx = test_context();
    register_alice(&ctx).await;

    let err = ctx
        .service
        .register(registration("ALICE", "other@x.com"), avatar_upload(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserAlreadyExists)));
}

#[tokio::test]
async fn test_register_surfaces_media_failure() {
    let ctx = test_context();
    ctx.media.set_failing(true);

    let err = ctx
        .service
        .register(registration("alice", "a@x.com"), avatar_upload(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Media { .. }));
}

// ---- login ----

#[tokio::test]
async fn test_login_with_username_and_with_email() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;

    let by_username = ctx.service.login("alice", "alice123").await.unwrap();
    assert_eq!(by_username.user.id, user.id);
    assert_ne!(by_username.tokens.access_token, by_username.tokens.refresh_token);

    let by_email = ctx.service.login("a@x.com", "alice123").await.unwrap();
    assert_eq!(by_email.user.id, user.id);
}

#[tokio::test]
async fn test_login_stores_refresh_token() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;

    let session = ctx.service.login("alice", "alice123").await.unwrap();

    let stored = ctx.users.get_refresh_token(user.id).await.unwrap();
    assert_eq!(stored.as_deref(), Some(session.tokens.refresh_token.as_str()));
}

#[tokio::test]
async fn test_login_replaces_previous_refresh_token() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;

    let first = ctx.service.login("alice", "alice123").await.unwrap();
    let second = ctx.service.login("alice", "alice123").await.unwrap();

    let stored = ctx.users.get_refresh_token(user.id).await.unwrap();
    assert_eq!(stored.as_deref(), Some(second.tokens.refresh_token.as_str()));

    // The first session's refresh token is now invalid
    let err = ctx.service.refresh(&first.tokens.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::RefreshTokenReused)));
}

#[tokio::test]
async fn test_login_unknown_account() {
    let ctx = test_context();

    let err = ctx.service.login("nobody", "pw").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_login_wrong_password_writes_nothing() {
    let ctx = test_context();
    register_alice(&ctx).await;
    let writes_before = ctx.users.refresh_token_writes();

    let err = ctx.service.login("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AuthenticationFailed)));
    assert_eq!(ctx.users.refresh_token_writes(), writes_before);
}

// ---- refresh rotation ----

#[tokio::test]
async fn test_refresh_rotates_token() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;
    let session = ctx.service.login("alice", "alice123").await.unwrap();

    let rotated = ctx.service.refresh(&session.tokens.refresh_token).await.unwrap();

    assert_ne!(rotated.tokens.refresh_token, session.tokens.refresh_token);
    let stored = ctx.users.get_refresh_token(user.id).await.unwrap();
    assert_eq!(stored.as_deref(), Some(rotated.tokens.refresh_token.as_str()));
}

#[tokio::test]
async fn test_refresh_token_is_single_use() {
    let ctx = test_context();
    register_alice(&ctx).await;
    let session = ctx.service.login("alice", "alice123").await.unwrap();

    // First use succeeds
    ctx.service.refresh(&session.tokens.refresh_token).await.unwrap();

    // Replaying the superseded token is a hard failure even though it is
    // still cryptographically valid and unexpired
    let err = ctx.service.refresh(&session.tokens.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::RefreshTokenReused)));
}

#[tokio::test]
async fn test_refresh_after_logout_fails() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;
    let session = ctx.service.login("alice", "alice123").await.unwrap();

    ctx.service.logout(user.id).await.unwrap();
    assert_eq!(ctx.users.get_refresh_token(user.id).await.unwrap(), None);

    let err = ctx.service.refresh(&session.tokens.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::RefreshTokenReused)));
}

#[tokio::test]
async fn test_refresh_rejects_garbage_token() {
    let ctx = test_context();

    let err = ctx.service.refresh("not-a-token").await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::Malformed)));
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    // An access token must not pass refresh verification: the kinds are
    // signed with different secrets.
    let ctx = test_context();
    register_alice(&ctx).await;
    let session = ctx.service.login("alice", "alice123").await.unwrap();

    let err = ctx.service.refresh(&session.tokens.access_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidSignature)));
}

// ---- password change ----

#[tokio::test]
async fn test_change_password_rejects_wrong_old_password() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;
    let hash_before = ctx.users.find_by_id(user.id).await.unwrap().unwrap().password_hash;

    let err = ctx
        .service
        .change_password(user.id, "wrong", "newpass")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AuthenticationFailed)));

    let hash_after = ctx.users.find_by_id(user.id).await.unwrap().unwrap().password_hash;
    assert_eq!(hash_before, hash_after);
}

#[tokio::test]
async fn test_change_password_switches_accepted_credentials() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;

    ctx.service
        .change_password(user.id, "alice123", "newpass")
        .await
        .unwrap();

    // Old password no longer works, new one does
    let err = ctx.service.login("alice", "alice123").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AuthenticationFailed)));
    ctx.service.login("alice", "newpass").await.unwrap();
}

#[tokio::test]
async fn test_change_password_keeps_session_alive() {
    // Reference behavior: the refresh token survives a password change.
    let ctx = test_context();
    let user = register_alice(&ctx).await;
    let session = ctx.service.login("alice", "alice123").await.unwrap();

    ctx.service
        .change_password(user.id, "alice123", "newpass")
        .await
        .unwrap();

    ctx.service.refresh(&session.tokens.refresh_token).await.unwrap();
}

// ---- profile and media ----

#[tokio::test]
async fn test_update_profile_requires_a_field() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;

    let err = ctx
        .service
        .update_profile(user.id, ProfileUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::RequiredField { .. })
    ));
}

#[tokio::test]
async fn test_update_profile_changes_username_and_email() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;

    let updated = ctx
        .service
        .update_profile(
            user.id,
            ProfileUpdate {
                username: Some("Wonderland".to_string()),
                email: Some("wonder@x.com".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.username, "wonderland");
    assert_eq!(updated.email, "wonder@x.com");
}

#[tokio::test]
async fn test_update_profile_rejects_taken_username() {
    let ctx = test_context();
    register_alice(&ctx).await;
    let bob = ctx
        .service
        .register(registration("bob", "b@x.com"), avatar_upload(), None)
        .await
        .unwrap();

    let err = ctx
        .service
        .update_profile(
            bob.id,
            ProfileUpdate {
                username: Some("alice".to_string()),
                email: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserAlreadyExists)));
}

#[tokio::test]
async fn test_update_avatar_replaces_url() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;
    let old_url = user.avatar_url.clone();

    let mut upload = MediaUpload::new(vec![9, 9, 9]);
    upload.filename = Some("new-avatar.png".to_string());
    let updated = ctx.service.update_avatar(user.id, upload).await.unwrap();

    assert_ne!(updated.avatar_url, old_url);
}

#[tokio::test]
async fn test_update_cover_image_sets_url() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;
    assert!(user.cover_image_url.is_none());

    let mut upload = MediaUpload::new(vec![9]);
    upload.filename = Some("cover.png".to_string());
    let updated = ctx.service.update_cover_image(user.id, upload).await.unwrap();

    assert!(updated.cover_image_url.is_some());
}

// ---- authenticate ----

#[tokio::test]
async fn test_authenticate_resolves_account() {
    let ctx = test_context();
    let user = register_alice(&ctx).await;
    let session = ctx.service.login("alice", "alice123").await.unwrap();

    let resolved = ctx.service.authenticate(&session.tokens.access_token).await.unwrap();
    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn test_authenticate_rejects_refresh_token() {
    let ctx = test_context();
    register_alice(&ctx).await;
    let session = ctx.service.login("alice", "alice123").await.unwrap();

    let err = ctx
        .service
        .authenticate(&session.tokens.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidSignature)));
}

#[tokio::test]
async fn test_authenticate_unknown_account() {
    let ctx = test_context();
    // Token for an account that was never persisted
    let tokens = TokenService::new(TokenConfig {
        access_secret: "access-test-secret".to_string(),
        refresh_secret: "refresh-test-secret".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 864_000,
        issuer: "clipstream".to_string(),
        audience: "clipstream-api".to_string(),
    })
    .unwrap();
    let token = tokens.issue_access_token(Uuid::new_v4()).unwrap();

    let err = ctx.service.authenticate(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AuthenticationFailed)));
}
