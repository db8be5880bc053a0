use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};

use cs_core::repositories::UserRepository;
use cs_core::services::MediaStore;
use cs_shared::types::ApiResponse;

use crate::dto::user::{AvatarForm, CoverImageForm, UserResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::CurrentUser;

use super::{to_media_upload, AppState};

/// Handler for PATCH /api/v1/users/avatar
///
/// Uploads a new avatar to the media host and stores its URL on the
/// account.
///
/// # Responses
/// - 200 OK: updated account
/// - 400 Bad Request: empty file
/// - 500 Internal Server Error: media host failure
pub async fn update_avatar<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    MultipartForm(form): MultipartForm<AvatarForm>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MediaStore + 'static,
{
    let upload = to_media_upload(form.avatar);

    match state.account_service.update_avatar(user.0.id, upload).await {
        Ok(updated) => HttpResponse::Ok().json(ApiResponse::success(
            UserResponse::from(&updated),
            "avatar updated successfully",
        )),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PATCH /api/v1/users/cover-image
///
/// Uploads a new cover image to the media host and stores its URL on the
/// account.
pub async fn update_cover_image<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    MultipartForm(form): MultipartForm<CoverImageForm>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MediaStore + 'static,
{
    let upload = to_media_upload(form.cover_image);

    match state
        .account_service
        .update_cover_image(user.0.id, upload)
        .await
    {
        Ok(updated) => HttpResponse::Ok().json(ApiResponse::success(
            UserResponse::from(&updated),
            "cover image updated successfully",
        )),
        Err(error) => handle_domain_error(&error),
    }
}
