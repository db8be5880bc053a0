use actix_web::{web, HttpRequest, HttpResponse};

use cs_core::errors::{AuthError, DomainError};
use cs_core::repositories::UserRepository;
use cs_core::services::MediaStore;
use cs_shared::types::ApiResponse;

use crate::dto::user::{RefreshResponse, RefreshTokenRequest};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

use super::{session_cookie, AppState};

/// Handler for POST /api/v1/users/refresh-token
///
/// Exchanges a refresh token for a new access + refresh pair. The token is
/// read from the JSON body (`refreshToken`) or, failing that, from the
/// `refreshToken` cookie. The presented token must match the account's
/// stored token exactly; a superseded token is rejected and refresh tokens
/// are therefore single-use.
///
/// # Responses
/// - 200 OK: new token pair, cookies updated
/// - 401 Unauthorized: token missing, invalid, expired, or already used
pub async fn refresh_token<U, M>(
    req: HttpRequest,
    state: web::Data<AppState<U, M>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MediaStore + 'static,
{
    let presented = body
        .and_then(|b| b.into_inner().refresh_token)
        .filter(|token| !token.trim().is_empty())
        .or_else(|| {
            req.cookie(REFRESH_TOKEN_COOKIE)
                .map(|cookie| cookie.value().to_string())
        });

    let Some(presented) = presented else {
        return handle_domain_error(&DomainError::Auth(AuthError::MissingAuthentication));
    };

    match state.account_service.refresh(&presented).await {
        Ok(session) => {
            let response = RefreshResponse {
                access_token: session.tokens.access_token.clone(),
                refresh_token: session.tokens.refresh_token.clone(),
            };

            HttpResponse::Ok()
                .cookie(session_cookie(
                    ACCESS_TOKEN_COOKIE,
                    &session.tokens.access_token,
                    &state.cookie,
                ))
                .cookie(session_cookie(
                    REFRESH_TOKEN_COOKIE,
                    &session.tokens.refresh_token,
                    &state.cookie,
                ))
                .json(ApiResponse::success(response, "access token refreshed"))
        }
        Err(error) => handle_domain_error(&error),
    }
}
