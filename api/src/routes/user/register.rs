use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};

use cs_core::repositories::UserRepository;
use cs_core::services::{MediaStore, Registration};
use cs_shared::types::ApiResponse;

use crate::dto::user::{RegisterForm, UserResponse};
use crate::handlers::error::handle_domain_error;

use super::{to_media_upload, AppState};

/// Handler for POST /api/v1/users/register
///
/// Creates a new account from a multipart body carrying the profile fields
/// plus the avatar file and an optional cover image file.
///
/// # Responses
/// - 201 Created: the new account (password and refresh token omitted)
/// - 400 Bad Request: missing/blank field or missing avatar
/// - 409 Conflict: username or email already registered
pub async fn register<U, M>(
    state: web::Data<AppState<U, M>>,
    MultipartForm(form): MultipartForm<RegisterForm>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MediaStore + 'static,
{
    log::info!("processing registration for username: {}", form.username.as_str());

    let registration = Registration {
        full_name: form.fullname.into_inner(),
        email: form.email.into_inner(),
        username: form.username.into_inner(),
        password: form.password.into_inner(),
    };
    let avatar = to_media_upload(form.avatar);
    let cover_image = form.cover_image.map(to_media_upload);

    match state
        .account_service
        .register(registration, avatar, cover_image)
        .await
    {
        Ok(user) => HttpResponse::Created().json(ApiResponse::success(
            UserResponse::from(&user),
            "user registered successfully",
        )),
        Err(error) => handle_domain_error(&error),
    }
}
