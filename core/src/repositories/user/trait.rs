//! User repository trait defining the interface for account persistence.
//!
//! The trait is async-first and returns `Result` for proper error handling.
//! It also doubles as the credential store: `set_refresh_token` and
//! `get_refresh_token` operate on the account's single refresh-token slot.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user found with given ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by username or email
    ///
    /// The identifier is matched against the lowercase username and the
    /// email address.
    async fn find_by_username_or_email(&self, identifier: &str)
        -> Result<Option<User>, DomainError>;

    /// Check whether a user exists with the given username or email
    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, DomainError>;

    /// Create a new user
    ///
    /// Fails with a conflict error if the username or email is already
    /// taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user (full validated save)
    ///
    /// Used by password change and profile updates. Fails with a conflict
    /// error if a changed username or email collides with another account.
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Store or clear the account's refresh token
    ///
    /// This is a raw single-column update: it must not re-hash the password
    /// or trigger any other save-time side effects. `None` persists NULL
    /// (revocation). The write is a single atomic statement, so concurrent
    /// writers resolve to last-writer-wins.
    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<(), DomainError>;

    /// Read the account's currently stored refresh token
    async fn get_refresh_token(&self, id: Uuid) -> Result<Option<String>, DomainError>;
}
