use actix_web::{web, HttpResponse};

use cs_core::errors::{DomainError, ValidationError};
use cs_core::repositories::UserRepository;
use cs_core::services::MediaStore;
use cs_shared::types::ApiResponse;
use cs_shared::utils::validation;

use crate::dto::user::{AuthResponse, LoginRequest, UserResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};

use super::{session_cookie, AppState};

/// Handler for POST /api/v1/users/login
///
/// Authenticates with username-or-email and password. On success the
/// response body carries the account and both tokens, and the tokens are
/// also set as `accessToken`/`refreshToken` cookies.
///
/// # Responses
/// - 200 OK: account + token pair, cookies set
/// - 400 Bad Request: neither username nor email supplied
/// - 404 Not Found: no such account
/// - 401 Unauthorized: wrong password
pub async fn login<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MediaStore + 'static,
{
    let request = request.into_inner();

    let identifier = request
        .username
        .as_deref()
        .filter(|v| !validation::is_blank(v))
        .or_else(|| request.email.as_deref().filter(|v| !validation::is_blank(v)));

    let Some(identifier) = identifier else {
        return handle_domain_error(&DomainError::ValidationErr(
            ValidationError::RequiredField {
                field: "username or email".to_string(),
            },
        ));
    };

    match state.account_service.login(identifier, &request.password).await {
        Ok(session) => {
            let response = AuthResponse {
                user: UserResponse::from(&session.user),
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
                .json(ApiResponse::success(response, "user logged in successfully"))
        }
        Err(error) => handle_domain_error(&error),
    }
}
