//! MySQL implementation of the UserRepository trait.
//!
//! Concrete account persistence using MySQL with SQLx. The schema lives in
//! `migrations/0001_create_users.sql`; `username` and `email` carry unique
//! indexes, and duplicate-key violations surface as conflict errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cs_core::domain::entities::user::User;
use cs_core::errors::{AuthError, DomainError};
use cs_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Whether an SQLx error is a unique-index violation (MySQL 1062)
    fn is_duplicate_entry(error: &sqlx::Error) -> bool {
        match error {
            sqlx::Error::Database(db_err) => db_err
                .code()
                .map(|code| code == "23000")
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("failed to get id: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("invalid UUID: {}", e)))?,
            username: row
                .try_get("username")
                .map_err(|e| DomainError::Database(format!("failed to get username: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Database(format!("failed to get email: {}", e)))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Database(format!("failed to get password_hash: {}", e)))?,
            full_name: row
                .try_get("full_name")
                .map_err(|e| DomainError::Database(format!("failed to get full_name: {}", e)))?,
            avatar_url: row
                .try_get("avatar_url")
                .map_err(|e| DomainError::Database(format!("failed to get avatar_url: {}", e)))?,
            cover_image_url: row.try_get("cover_image_url").map_err(|e| {
                DomainError::Database(format!("failed to get cover_image_url: {}", e))
            })?,
            refresh_token: row
                .try_get("refresh_token")
                .map_err(|e| DomainError::Database(format!("failed to get refresh_token: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("failed to get created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database(format!("failed to get updated_at: {}", e)))?,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, username, email, password_hash, full_name,
           avatar_url, cover_image_url, refresh_token,
           created_at, updated_at
    FROM users
"#;

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, DomainError> {
        let query = format!(
            "{} WHERE username = LOWER(?) OR email = ? LIMIT 1",
            SELECT_COLUMNS
        );
        let identifier = identifier.trim();

        let result = sqlx::query(&query)
            .bind(identifier)
            .bind(identifier)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<bool, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE username = LOWER(?) OR email = ?",
        )
        .bind(username.trim())
        .bind(email.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Database(format!("database query failed: {}", e)))?;

        Ok(count > 0)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, username, email, password_hash, full_name,
                avatar_url, cover_image_url, refresh_token,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.full_name)
            .bind(&user.avatar_url)
            .bind(&user.cover_image_url)
            .bind(&user.refresh_token)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if Self::is_duplicate_entry(&e) {
                    DomainError::Auth(AuthError::UserAlreadyExists)
                } else {
                    DomainError::Database(format!("failed to create user: {}", e))
                }
            })?;

        tracing::debug!(user_id = %user.id, "user row inserted");

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                username = ?,
                email = ?,
                password_hash = ?,
                full_name = ?,
                avatar_url = ?,
                cover_image_url = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.full_name)
            .bind(&user.avatar_url)
            .bind(&user.cover_image_url)
            .bind(Utc::now())
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if Self::is_duplicate_entry(&e) {
                    DomainError::Auth(AuthError::UserAlreadyExists)
                } else {
                    DomainError::Database(format!("failed to update user: {}", e))
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(user)
    }

    async fn set_refresh_token(&self, id: Uuid, token: Option<&str>) -> Result<(), DomainError> {
        // Deliberately a raw single-column update: no password re-hash, no
        // other save-time side effects. One statement keeps concurrent
        // writers serialized at the row.
        let result = sqlx::query("UPDATE users SET refresh_token = ?, updated_at = ? WHERE id = ?")
            .bind(token)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("failed to store refresh token: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(())
    }

    async fn get_refresh_token(&self, id: Uuid) -> Result<Option<String>, DomainError> {
        let token: Option<Option<String>> =
            sqlx::query_scalar("SELECT refresh_token FROM users WHERE id = ? LIMIT 1")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::Database(format!("failed to read refresh token: {}", e)))?;

        match token {
            Some(value) => Ok(value),
            None => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
        }
    }
}
