//! Shared setup for API integration tests
#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Arc;

use actix_web::web;

use cs_api::routes::user::AppState;
use cs_core::repositories::MockUserRepository;
use cs_core::services::{
    AccountService, AccountServiceConfig, MockMediaStore, TokenConfig, TokenService,
};
use cs_shared::config::CookieConfig;

pub type TestState = AppState<MockUserRepository, MockMediaStore>;

pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        access_secret: "access-test-secret".to_string(),
        refresh_secret: "refresh-test-secret".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 864_000,
        issuer: "clipstream".to_string(),
        audience: "clipstream-api".to_string(),
    }
}

/// Build app state over in-memory mocks
pub fn build_state() -> web::Data<TestState> {
    let users = Arc::new(MockUserRepository::new());
    let media = Arc::new(MockMediaStore::new());
    let tokens = Arc::new(TokenService::new(test_token_config()).unwrap());

    let account_service = Arc::new(AccountService::new(
        users,
        media,
        tokens,
        AccountServiceConfig::for_tests(),
    ));

    web::Data::new(AppState {
        account_service,
        cookie: CookieConfig::default(),
    })
}

pub const BOUNDARY: &str = "----clipstream-test-boundary";

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

fn push_text_field(body: &mut Vec<u8>, name: &str, value: &str) {
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
            BOUNDARY, name, value
        )
        .as_bytes(),
    );
}

fn push_file_field(body: &mut Vec<u8>, name: &str, filename: &str, bytes: &[u8]) {
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
            BOUNDARY, name, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
}

fn close_body(body: &mut Vec<u8>) {
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
}

/// Multipart body for the register endpoint
pub fn register_body(
    fullname: &str,
    email: &str,
    username: &str,
    password: &str,
    with_cover: bool,
) -> Vec<u8> {
    let mut body = Vec::new();
    push_text_field(&mut body, "fullname", fullname);
    push_text_field(&mut body, "email", email);
    push_text_field(&mut body, "username", username);
    push_text_field(&mut body, "password", password);
    push_file_field(&mut body, "avatar", "avatar.png", &[0x89, b'P', b'N', b'G']);
    if with_cover {
        push_file_field(&mut body, "coverImage", "cover.png", &[1, 2, 3, 4]);
    }
    close_body(&mut body);
    body
}

/// Multipart body carrying a single file field
pub fn file_body(name: &str, filename: &str) -> Vec<u8> {
    let mut body = Vec::new();
    push_file_field(&mut body, name, filename, &[9, 9, 9, 9]);
    close_body(&mut body);
    body
}
