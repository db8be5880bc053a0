//! Account route handlers
//!
//! One module per endpoint:
//! - registration and login
//! - logout and token refresh
//! - password change
//! - current user, account details, avatar and cover image updates

pub mod account;
pub mod current;
pub mod login;
pub mod logout;
pub mod media;
pub mod password;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use actix_multipart::form::bytes::Bytes as UploadedFile;
use actix_web::cookie::{Cookie, SameSite};

use cs_core::repositories::UserRepository;
use cs_core::services::{AccountService, MediaStore, MediaUpload};
use cs_shared::config::CookieConfig;

/// Application state that holds shared services
pub struct AppState<U, M>
where
    U: UserRepository,
    M: MediaStore,
{
    pub account_service: Arc<AccountService<U, M>>,
    pub cookie: CookieConfig,
}

/// Builds a session cookie for an issued token
///
/// HttpOnly keeps scripts away from the tokens; SameSite=Strict keeps them
/// off cross-site requests; Secure is enabled in production.
pub(crate) fn session_cookie<'a>(name: &'a str, value: &'a str, config: &CookieConfig) -> Cookie<'a> {
    Cookie::build(name, value)
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(SameSite::Strict)
        .finish()
}

/// Builds a cookie that removes the named session cookie from the client
pub(crate) fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

/// Converts a decoded multipart file field into a domain media upload
pub(crate) fn to_media_upload(file: UploadedFile) -> MediaUpload {
    MediaUpload {
        bytes: file.data.to_vec(),
        filename: file.file_name,
        content_type: file.content_type.map(|mime| mime.to_string()),
    }
}
