use actix_web::{web, HttpResponse};

use cs_core::repositories::UserRepository;
use cs_core::services::MediaStore;
use cs_shared::types::ApiResponse;

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::{CurrentUser, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

use super::{removal_cookie, AppState};

/// Handler for POST /api/v1/users/logout
///
/// Clears the stored refresh token, immediately revoking the session, and
/// removes both session cookies from the client. Requires authentication.
///
/// # Responses
/// - 200 OK: empty data, cookies cleared
/// - 401 Unauthorized: missing or invalid access token
pub async fn logout<U, M>(
    state: web::Data<AppState<U, M>>,
    user: CurrentUser,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MediaStore + 'static,
{
    match state.account_service.logout(user.0.id).await {
        Ok(()) => HttpResponse::Ok()
            .cookie(removal_cookie(ACCESS_TOKEN_COOKIE))
            .cookie(removal_cookie(REFRESH_TOKEN_COOKIE))
            .json(ApiResponse::empty("user logged out successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
