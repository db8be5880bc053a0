use actix_web::HttpResponse;

use cs_shared::types::ApiResponse;

use crate::dto::user::UserResponse;
use crate::middleware::auth::CurrentUser;

/// Handler for GET /api/v1/users/current-user
///
/// Returns the account resolved by the authentication middleware.
pub async fn current_user(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(
        UserResponse::from(&user.0),
        "current user fetched successfully",
    ))
}
