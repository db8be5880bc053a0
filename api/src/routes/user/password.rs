use actix_web::{web, HttpResponse};
use validator::Validate;

use cs_core::repositories::UserRepository;
use cs_core::services::MediaStore;
use cs_shared::types::ApiResponse;

use crate::dto::user::ChangePasswordRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::CurrentUser;

use super::AppState;

/// Handler for POST /api/v1/users/password-changes
///
/// Replaces the account password after verifying the old one. The stored
/// refresh token is not rotated, so existing sessions stay valid.
///
/// # Responses
/// - 200 OK: empty data
/// - 400 Bad Request: missing field
/// - 401 Unauthorized: wrong old password or missing auth
pub async fn change_password<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MediaStore + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    match state
        .account_service
        .change_password(user.0.id, &request.old_password, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::empty("password changed successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
