//! Application factory
//!
//! Builds the actix-web application with middleware, routes, and shared
//! state. Used by both `main` and the integration tests.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, HttpResponse,
};

use cs_core::repositories::UserRepository;
use cs_core::services::MediaStore;

use crate::dto::ErrorResponse;
use crate::middleware::{auth::JwtAuth, auth::RequestAuthenticator, cors::create_cors, security::SecurityMiddleware};
use crate::routes::user::{
    account::update_account, current::current_user, login::login, logout::logout,
    media::update_avatar, media::update_cover_image, password::change_password,
    refresh::refresh_token, register::register, AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<U, M>(
    app_state: web::Data<AppState<U, M>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    M: MediaStore + 'static,
{
    // The auth middleware reaches the account service through a trait
    // object, independent of the concrete repository and media-store types
    let authenticator: Arc<dyn RequestAuthenticator> = app_state.account_service.clone();

    let cors = create_cors();
    let security = SecurityMiddleware::new();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(authenticator))
        // JSON bodies stay small; file uploads are limited per multipart field
        .app_data(web::JsonConfig::default().limit(16 * 1024))
        // Order matters: security first, then CORS, then logging
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(security)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1/users")
                .route("/register", web::post().to(register::<U, M>))
                .route("/login", web::post().to(login::<U, M>))
                .route("/refresh-token", web::post().to(refresh_token::<U, M>))
                .route(
                    "/logout",
                    web::post().to(logout::<U, M>).wrap(JwtAuth::new()),
                )
                .route(
                    "/password-changes",
                    web::post().to(change_password::<U, M>).wrap(JwtAuth::new()),
                )
                .route(
                    "/current-user",
                    web::get().to(current_user).wrap(JwtAuth::new()),
                )
                .route(
                    "/update-account",
                    web::patch().to(update_account::<U, M>).wrap(JwtAuth::new()),
                )
                .route(
                    "/avatar",
                    web::patch().to(update_avatar::<U, M>).wrap(JwtAuth::new()),
                )
                .route(
                    "/cover-image",
                    web::patch()
                        .to(update_cover_image::<U, M>)
                        .wrap(JwtAuth::new()),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "clipstream-account-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new("not_found", "The requested resource was not found")
        .to_response(actix_web::http::StatusCode::NOT_FOUND)
}
