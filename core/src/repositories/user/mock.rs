//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
///
/// Mirrors the MySQL implementation's semantics, including unique
/// username/email enforcement. Refresh-token writes are counted so tests can
/// assert that failed flows perform no storage writes.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    refresh_token_writes: AtomicUsize,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            refresh_token_writes: AtomicUsize::new(0),
        }
    }

    /// Number of `set_refresh_token` calls made against this repository
    pub fn refresh_token_writes(&self) -> usize {
        self.refresh_token_writes.load(Ordering::SeqCst)
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, DomainError> {
        let normalized = identifier.trim().to_lowercase();
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username == normalized || u.email.eq_ignore_ascii_case(identifier.trim()))
            .cloned())
    }

    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, DomainError> {
        let normalized = username.trim().to_lowercase();
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.username == normalized || u.email.eq_ignore_ascii_case(email.trim())))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.username == user.username || u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        if users.values().any(|u| {
            u.id != user.id
                && (u.username == user.username || u.email.eq_ignore_ascii_case(&user.email))
        }) {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<(), DomainError> {
        self.refresh_token_writes.fetch_add(1, Ordering::SeqCst);

        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(DomainError::NotFound {
            resource: "User".to_string(),
        })?;

        user.refresh_token = token.map(|t| t.to_string());
        Ok(())
    }

    async fn get_refresh_token(&self, id: Uuid) -> Result<Option<String>, DomainError> {
        let users = self.users.read().await;
        let user = users.get(&id).ok_or(DomainError::NotFound {
            resource: "User".to_string(),
        })?;

        Ok(user.refresh_token.clone())
    }
}
