//! Main account service implementation

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use uuid::Uuid;

use cs_shared::utils::validation;

use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthenticatedSession;
use crate::errors::{AuthError, DomainResult, TokenError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::media::{MediaStore, MediaUpload};
use crate::services::token::TokenService;

use super::config::AccountServiceConfig;
use super::password;

/// Registration input for a new account
#[derive(Debug, Clone)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Partial profile update; at least one field must be present
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Account service coordinating session and profile flows
///
/// Session state is always re-derived per request from the persisted
/// account record; nothing is cached across calls.
pub struct AccountService<U, M>
where
    U: UserRepository,
    M: MediaStore,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Remote media host for avatar and cover images
    media_store: Arc<M>,
    /// Token service for JWT issuance and verification
    token_service: Arc<TokenService>,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<U, M> AccountService<U, M>
where
    U: UserRepository,
    M: MediaStore,
{
    /// Create a new account service
    pub fn new(
        user_repository: Arc<U>,
        media_store: Arc<M>,
        token_service: Arc<TokenService>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            media_store,
            token_service,
            config,
        }
    }

    /// Register a new account
    ///
    /// Validates required fields, rejects duplicate username/email, uploads
    /// the avatar (required) and cover image (optional), hashes the
    /// password, and persists the account.
    pub async fn register(
        &self,
        registration: Registration,
        avatar: MediaUpload,
        cover_image: Option<MediaUpload>,
    ) -> DomainResult<User> {
        let required = [
            ("fullname", &registration.full_name),
            ("email", &registration.email),
            ("username", &registration.username),
            ("password", &registration.password),
        ];
        for (field, value) in required {
            if validation::is_blank(value) {
                return Err(ValidationError::RequiredField {
                    field: field.to_string(),
                }
                .into());
            }
        }

        let email = registration.email.trim();
        if !validation::is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let username = registration.username.trim().to_lowercase();
        if !validation::is_valid_username(&username) {
            return Err(ValidationError::InvalidFormat {
                field: "username".to_string(),
            }
            .into());
        }

        if avatar.bytes.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "avatar".to_string(),
            }
            .into());
        }

        if self
            .user_repository
            .exists_by_username_or_email(&username, email)
            .await?
        {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let avatar_asset = self.media_store.upload(avatar).await?;
        let cover_asset = match cover_image {
            Some(upload) if !upload.bytes.is_empty() => {
                Some(self.media_store.upload(upload).await?)
            }
            _ => None,
        };

        let password_hash = password::hash_password(&registration.password, self.config.bcrypt_cost)?;

        let user = User::new(
            &username,
            email,
            password_hash,
            &registration.full_name,
            avatar_asset.url,
            cover_asset.map(|asset| asset.url),
        );

        let user = self.user_repository.create(user).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "account registered");

        Ok(user)
    }

    /// Log a user in with username-or-email and password
    ///
    /// On success a fresh token pair is issued and the refresh token is
    /// written to the account's credential slot, invalidating any prior
    /// value. A failed login issues nothing and writes nothing.
    pub async fn login(&self, identifier: &str, password: &str) -> DomainResult<AuthenticatedSession> {
        if validation::is_blank(identifier) {
            return Err(ValidationError::RequiredField {
                field: "username or email".to_string(),
            }
            .into());
        }
        if validation::is_blank(password) {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }
            .into());
        }

        let mut user = self
            .user_repository
            .find_by_username_or_email(identifier)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !password::verify_password(password, &user.password_hash)? {
            return Err(AuthError::AuthenticationFailed.into());
        }

        let tokens = self.token_service.issue_pair(user.id)?;
        self.user_repository
            .set_refresh_token(user.id, Some(&tokens.refresh_token))
            .await?;
        user.set_refresh_token(Some(tokens.refresh_token.clone()));

        tracing::info!(user_id = %user.id, "user logged in");

        Ok(AuthenticatedSession { user, tokens })
    }

    /// Log a user out, clearing the stored refresh token
    pub async fn logout(&self, user_id: Uuid) -> DomainResult<()> {
        self.user_repository.set_refresh_token(user_id, None).await?;
        tracing::info!(user_id = %user_id, "user logged out");
        Ok(())
    }

    /// Exchange a refresh token for a new token pair (rotation-on-use)
    ///
    /// The presented token must verify cryptographically AND byte-equal the
    /// account's stored token. A token that was already rotated away or
    /// cleared is rejected even while cryptographically valid, which makes
    /// every refresh token single-use.
    pub async fn refresh(&self, presented: &str) -> DomainResult<AuthenticatedSession> {
        let claims = self.token_service.verify_refresh_token(presented)?;
        let user_id = claims.user_id().map_err(|_| TokenError::Malformed)?;

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(TokenError::InvalidRefreshToken)?;

        let stored = user
            .refresh_token
            .as_deref()
            .ok_or(TokenError::RefreshTokenReused)?;
        if !constant_time_eq(stored.as_bytes(), presented.as_bytes()) {
            tracing::warn!(user_id = %user.id, "superseded refresh token rejected");
            return Err(TokenError::RefreshTokenReused.into());
        }

        let tokens = self.token_service.issue_pair(user.id)?;
        self.user_repository
            .set_refresh_token(user.id, Some(&tokens.refresh_token))
            .await?;
        user.set_refresh_token(Some(tokens.refresh_token.clone()));

        tracing::debug!(user_id = %user.id, "refresh token rotated");

        Ok(AuthenticatedSession { user, tokens })
    }

    /// Change the account password
    ///
    /// The stored refresh token is left untouched: existing sessions survive
    /// a password change.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if validation::is_blank(old_password) || validation::is_blank(new_password) {
            return Err(ValidationError::RequiredField {
                field: "oldPassword and newPassword".to_string(),
            }
            .into());
        }

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(crate::errors::DomainError::NotFound {
                resource: "User".to_string(),
            })?;

        if !password::verify_password(old_password, &user.password_hash)? {
            return Err(AuthError::AuthenticationFailed.into());
        }

        let new_hash = password::hash_password(new_password, self.config.bcrypt_cost)?;
        user.set_password_hash(new_hash);
        self.user_repository.update(user).await?;

        tracing::info!(user_id = %user_id, "password changed");

        Ok(())
    }

    /// Fetch the current account
    pub async fn current_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(crate::errors::DomainError::NotFound {
                resource: "User".to_string(),
            })
    }

    /// Update username and/or email
    pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> DomainResult<User> {
        let username = update.username.filter(|u| !validation::is_blank(u));
        let email = update.email.filter(|e| !validation::is_blank(e));

        if username.is_none() && email.is_none() {
            return Err(ValidationError::RequiredField {
                field: "username or email".to_string(),
            }
            .into());
        }

        if let Some(email) = &email {
            if !validation::is_valid_email(email.trim()) {
                return Err(ValidationError::InvalidEmail.into());
            }
        }
        if let Some(username) = &username {
            if !validation::is_valid_username(&username.trim().to_lowercase()) {
                return Err(ValidationError::InvalidFormat {
                    field: "username".to_string(),
                }
                .into());
            }
        }

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(crate::errors::DomainError::NotFound {
                resource: "User".to_string(),
            })?;

        if let Some(username) = username {
            user.set_username(&username);
        }
        if let Some(email) = email {
            user.set_email(&email);
        }

        let user = self.user_repository.update(user).await?;
        tracing::info!(user_id = %user.id, "account details updated");

        Ok(user)
    }

    /// Replace the account's avatar with a freshly uploaded file
    pub async fn update_avatar(&self, user_id: Uuid, upload: MediaUpload) -> DomainResult<User> {
        if upload.bytes.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "avatar".to_string(),
            }
            .into());
        }

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(crate::errors::DomainError::NotFound {
                resource: "User".to_string(),
            })?;

        let asset = self.media_store.upload(upload).await?;
        user.set_avatar_url(asset.url);

        Ok(self.user_repository.update(user).await?)
    }

    /// Replace the account's cover image with a freshly uploaded file
    pub async fn update_cover_image(&self, user_id: Uuid, upload: MediaUpload) -> DomainResult<User> {
        if upload.bytes.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "coverImage".to_string(),
            }
            .into());
        }

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(crate::errors::DomainError::NotFound {
                resource: "User".to_string(),
            })?;

        let asset = self.media_store.upload(upload).await?;
        user.set_cover_image_url(asset.url);

        Ok(self.user_repository.update(user).await?)
    }

    /// Resolve the account behind an access token
    ///
    /// Used by the authentication middleware. Any failure collapses to an
    /// authentication error apart from the distinct token failure kinds.
    pub async fn authenticate(&self, access_token: &str) -> DomainResult<User> {
        let claims = self.token_service.verify_access_token(access_token)?;
        let user_id = claims.user_id().map_err(|_| TokenError::Malformed)?;

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::AuthenticationFailed.into())
    }
}
