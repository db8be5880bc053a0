//! Integration tests for the auth middleware and the protected account routes

mod common;

use actix_web::body::MessageBody;
use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{http::header, test};

use cs_api::app::create_app;

use common::{build_state, file_body, multipart_content_type, register_body};

/// Registers an account and logs in, returning its access token
async fn seed_logged_in_user<S, B>(app: &S, username: &str, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .insert_header((header::CONTENT_TYPE, multipart_content_type()))
        .set_payload(register_body("Test User", email, username, "pass1234", false))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(serde_json::json!({ "username": username, "password": "pass1234" }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    body["data"]["accessToken"].as_str().unwrap().to_string()
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let app = test::init_service(create_app(build_state())).await;

    let requests = [
        test::TestRequest::get().uri("/api/v1/users/current-user"),
        test::TestRequest::post().uri("/api/v1/users/logout"),
        test::TestRequest::post().uri("/api/v1/users/password-changes"),
        test::TestRequest::patch().uri("/api/v1/users/update-account"),
    ];

    for request in requests {
        let resp = test::call_service(&app, request.to_request()).await;
        assert_eq!(resp.status(), 401);
    }
}

#[actix_web::test]
async fn test_garbage_token_is_rejected() {
    let app = test::init_service(create_app(build_state())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/current-user")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_current_user_with_bearer_header() {
    let app = test::init_service(create_app(build_state())).await;
    let token = seed_logged_in_user(&app, "alice", "a@x.com").await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/current-user")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["username"], "alice");
}

#[actix_web::test]
async fn test_current_user_with_cookie() {
    let app = test::init_service(create_app(build_state())).await;
    let token = seed_logged_in_user(&app, "alice", "a@x.com").await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/current-user")
        .cookie(actix_web::cookie::Cookie::new("accessToken", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_change_password_switches_credentials() {
    let app = test::init_service(create_app(build_state())).await;
    let token = seed_logged_in_user(&app, "alice", "a@x.com").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/password-changes")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(serde_json::json!({ "oldPassword": "pass1234", "newPassword": "brand-new" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Old password no longer logs in
    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(serde_json::json!({ "username": "alice", "password": "pass1234" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // New password does
    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(serde_json::json!({ "username": "alice", "password": "brand-new" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_change_password_wrong_old_password() {
    let app = test::init_service(create_app(build_state())).await;
    let token = seed_logged_in_user(&app, "alice", "a@x.com").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/password-changes")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(serde_json::json!({ "oldPassword": "nope", "newPassword": "brand-new" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_update_account_changes_details() {
    let app = test::init_service(create_app(build_state())).await;
    let token = seed_logged_in_user(&app, "alice", "a@x.com").await;

    let req = test::TestRequest::patch()
        .uri("/api/v1/users/update-account")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(serde_json::json!({ "username": "Wonderland", "email": "wonder@x.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["username"], "wonderland");
    assert_eq!(body["data"]["email"], "wonder@x.com");
}

#[actix_web::test]
async fn test_update_account_requires_a_field() {
    let app = test::init_service(create_app(build_state())).await;
    let token = seed_logged_in_user(&app, "alice", "a@x.com").await;

    let req = test::TestRequest::patch()
        .uri("/api/v1/users/update-account")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_update_account_conflict() {
    let app = test::init_service(create_app(build_state())).await;
    seed_logged_in_user(&app, "alice", "a@x.com").await;
    let bob_token = seed_logged_in_user(&app, "bob", "b@x.com").await;

    let req = test::TestRequest::patch()
        .uri("/api/v1/users/update-account")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", bob_token)))
        .set_json(serde_json::json!({ "username": "alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn test_update_avatar() {
    let app = test::init_service(create_app(build_state())).await;
    let token = seed_logged_in_user(&app, "alice", "a@x.com").await;

    let req = test::TestRequest::patch()
        .uri("/api/v1/users/avatar")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .insert_header((header::CONTENT_TYPE, multipart_content_type()))
        .set_payload(file_body("avatar", "new-avatar.png"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["data"]["avatar"]
        .as_str()
        .unwrap()
        .contains("new-avatar.png"));
}

#[actix_web::test]
async fn test_update_cover_image() {
    let app = test::init_service(create_app(build_state())).await;
    let token = seed_logged_in_user(&app, "alice", "a@x.com").await;

    let req = test::TestRequest::patch()
        .uri("/api/v1/users/cover-image")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .insert_header((header::CONTENT_TYPE, multipart_content_type()))
        .set_payload(file_body("coverImage", "cover.png"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["data"]["coverImage"].as_str().is_some());
}
