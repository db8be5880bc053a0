//! User entity representing a registered ClipStream account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
///
/// The `refresh_token` field is the account's single credential slot: when
/// non-null it holds exactly the refresh token most recently issued to this
/// account. Issuing a new token overwrites it; logout clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique username, stored lowercase
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Bcrypt hash of the user's password
    pub password_hash: String,

    /// Display name
    pub full_name: String,

    /// URL of the avatar image on the media host
    pub avatar_url: String,

    /// URL of the optional cover image on the media host
    pub cover_image_url: Option<String>,

    /// Currently valid refresh token, if any
    pub refresh_token: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance
    ///
    /// The username is normalized to lowercase before storage.
    pub fn new(
        username: &str,
        email: &str,
        password_hash: String,
        full_name: &str,
        avatar_url: String,
        cover_image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.trim().to_lowercase(),
            email: email.trim().to_string(),
            password_hash,
            full_name: full_name.trim().to_string(),
            avatar_url,
            cover_image_url,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stores a new refresh token, superseding any previous one
    pub fn set_refresh_token(&mut self, token: Option<String>) {
        self.refresh_token = token;
        self.updated_at = Utc::now();
    }

    /// Replaces the username, normalizing to lowercase
    pub fn set_username(&mut self, username: &str) {
        self.username = username.trim().to_lowercase();
        self.updated_at = Utc::now();
    }

    /// Replaces the email address
    pub fn set_email(&mut self, email: &str) {
        self.email = email.trim().to_string();
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Replaces the avatar URL
    pub fn set_avatar_url(&mut self, url: String) {
        self.avatar_url = url;
        self.updated_at = Utc::now();
    }

    /// Replaces the cover image URL
    pub fn set_cover_image_url(&mut self, url: String) {
        self.cover_image_url = Some(url);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "Alice",
            "alice@example.com",
            "$2b$12$hash".to_string(),
            "Alice Doe",
            "https://media.example.com/avatar.png".to_string(),
            None,
        )
    }

    #[test]
    fn test_new_user_normalizes_username() {
        let user = sample_user();

        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert!(user.refresh_token.is_none());
        assert!(user.cover_image_url.is_none());
    }

    #[test]
    fn test_set_refresh_token_supersedes_previous() {
        let mut user = sample_user();

        user.set_refresh_token(Some("token-1".to_string()));
        assert_eq!(user.refresh_token.as_deref(), Some("token-1"));

        user.set_refresh_token(Some("token-2".to_string()));
        assert_eq!(user.refresh_token.as_deref(), Some("token-2"));

        user.set_refresh_token(None);
        assert!(user.refresh_token.is_none());
    }

    #[test]
    fn test_set_username_lowercases() {
        let mut user = sample_user();
        user.set_username("NewName");
        assert_eq!(user.username, "newname");
    }

    #[test]
    fn test_mutators_touch_updated_at() {
        let mut user = sample_user();
        let before = user.updated_at;
        user.set_email("new@example.com");
        assert!(user.updated_at >= before);
        assert_eq!(user.email, "new@example.com");
    }
}
