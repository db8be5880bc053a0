//! Account request/response DTOs
//!
//! Response DTOs never carry the password hash or the stored refresh token;
//! those stay server-side.

use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use cs_core::domain::entities::user::User;

/// Multipart body for POST /register
#[derive(Debug, MultipartForm)]
pub struct RegisterForm {
    pub fullname: Text<String>,
    pub email: Text<String>,
    pub username: Text<String>,
    pub password: Text<String>,
    #[multipart(limit = "5MiB")]
    pub avatar: Bytes,
    #[multipart(rename = "coverImage", limit = "5MiB")]
    pub cover_image: Option<Bytes>,
}

/// Multipart body for PATCH /avatar
#[derive(Debug, MultipartForm)]
pub struct AvatarForm {
    #[multipart(limit = "5MiB")]
    pub avatar: Bytes,
}

/// Multipart body for PATCH /cover-image
#[derive(Debug, MultipartForm)]
pub struct CoverImageForm {
    #[multipart(rename = "coverImage", limit = "5MiB")]
    pub cover_image: Bytes,
}

/// JSON body for POST /login; either username or email must be present
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

/// JSON body for POST /refresh-token; the token may instead arrive in the
/// `refreshToken` cookie
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// JSON body for POST /password-changes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "old password is required"))]
    pub old_password: String,
    #[validate(length(min = 1, message = "new password is required"))]
    pub new_password: String,
}

/// JSON body for PATCH /update-account
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 3, max = 30))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// Public view of an account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub fullname: String,
    pub avatar: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            fullname: user.full_name.clone(),
            avatar: user.avatar_url.clone(),
            cover_image: user.cover_image_url.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Payload for a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

/// Payload for a successful token refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_omits_credentials() {
        let user = User::new(
            "alice",
            "a@x.com",
            "$2b$12$hash".to_string(),
            "Alice Doe",
            "https://media.test/a.png".to_string(),
            None,
        );

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
        assert!(!object.contains_key("refreshToken"));
        assert_eq!(json["username"], "alice");
        assert_eq!(json["fullname"], "Alice Doe");
    }

    #[test]
    fn test_refresh_request_accepts_missing_token() {
        let parsed: RefreshTokenRequest = serde_json::from_str("{}").unwrap();
        assert!(parsed.refresh_token.is_none());

        let parsed: RefreshTokenRequest =
            serde_json::from_str(r#"{"refreshToken":"abc"}"#).unwrap();
        assert_eq!(parsed.refresh_token.as_deref(), Some("abc"));
    }
}
