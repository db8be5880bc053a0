use actix_web::{web, HttpResponse};
use validator::Validate;

use cs_core::repositories::UserRepository;
use cs_core::services::{MediaStore, ProfileUpdate};
use cs_shared::types::ApiResponse;

use crate::dto::user::{UpdateAccountRequest, UserResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::CurrentUser;

use super::AppState;

/// Handler for PATCH /api/v1/users/update-account
///
/// Updates the username and/or email; at least one must be supplied.
///
/// # Responses
/// - 200 OK: updated account
/// - 400 Bad Request: no field supplied or invalid format
/// - 409 Conflict: username or email already taken
pub async fn update_account<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
    request: web::Json<UpdateAccountRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MediaStore + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(errors);
    }

    let request = request.into_inner();
    let update = ProfileUpdate {
        username: request.username,
        email: request.email,
    };

    match state.account_service.update_profile(user.0.id, update).await {
        Ok(updated) => HttpResponse::Ok().json(ApiResponse::success(
            UserResponse::from(&updated),
            "account details updated successfully",
        )),
        Err(error) => handle_domain_error(&error),
    }
}
