//! Central error-translation boundary
//!
//! Every domain failure is converted to an HTTP response here, in one
//! place. Anything unexpected collapses to a generic 500 so internals never
//! leak to callers.

use actix_web::{http::StatusCode, HttpResponse};

use cs_core::errors::{AuthError, DomainError, TokenError, ValidationError};

use crate::dto::ErrorResponse;

/// Convert request-body validation failures into a 400 response
pub fn handle_validation_errors(errors: validator::ValidationErrors) -> HttpResponse {
    log::warn!("request validation failed: {}", errors);

    ErrorResponse::new("validation_error", errors.to_string().replace('\n', "; "))
        .to_response(StatusCode::BAD_REQUEST)
}

/// Convert domain errors into the appropriate HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    log::error!("domain error: {:?}", error);

    match error {
        DomainError::Validation { message } => {
            ErrorResponse::new("validation_error", message).to_response(StatusCode::BAD_REQUEST)
        }

        DomainError::ValidationErr(validation_error) => match validation_error {
            ValidationError::DuplicateValue { field } => ErrorResponse::new(
                "conflict",
                format!("{} is already in use", field),
            )
            .to_response(StatusCode::CONFLICT),
            other => ErrorResponse::new("validation_error", other.to_string())
                .to_response(StatusCode::BAD_REQUEST),
        },

        DomainError::NotFound { resource } => {
            ErrorResponse::new("not_found", format!("{} not found", resource))
                .to_response(StatusCode::NOT_FOUND)
        }

        DomainError::Auth(auth_error) => match auth_error {
            AuthError::UserNotFound => ErrorResponse::new("user_not_found", "user does not exist")
                .to_response(StatusCode::NOT_FOUND),
            AuthError::UserAlreadyExists => {
                ErrorResponse::new("user_already_exists", "username or email already exists")
                    .to_response(StatusCode::CONFLICT)
            }
            AuthError::AuthenticationFailed => {
                ErrorResponse::new("authentication_failed", "invalid credentials")
                    .to_response(StatusCode::UNAUTHORIZED)
            }
            AuthError::MissingAuthentication => {
                ErrorResponse::new("unauthorized", "authentication required")
                    .to_response(StatusCode::UNAUTHORIZED)
            }
        },

        DomainError::Token(token_error) => match token_error {
            TokenError::TokenExpired => {
                ErrorResponse::new("token_expired", "token has expired")
                    .to_response(StatusCode::UNAUTHORIZED)
            }
            TokenError::InvalidSignature => {
                ErrorResponse::new("invalid_signature", "token signature verification failed")
                    .to_response(StatusCode::UNAUTHORIZED)
            }
            TokenError::Malformed => ErrorResponse::new("malformed_token", "malformed token")
                .to_response(StatusCode::UNAUTHORIZED),
            TokenError::TokenNotYetValid => {
                ErrorResponse::new("token_not_yet_valid", "token not yet valid")
                    .to_response(StatusCode::UNAUTHORIZED)
            }
            TokenError::InvalidClaims => {
                ErrorResponse::new("invalid_claims", "invalid token claims")
                    .to_response(StatusCode::UNAUTHORIZED)
            }
            TokenError::InvalidRefreshToken => {
                ErrorResponse::new("invalid_refresh_token", "invalid refresh token")
                    .to_response(StatusCode::UNAUTHORIZED)
            }
            TokenError::RefreshTokenReused => {
                ErrorResponse::new("refresh_token_reused", "refresh token is expired or used")
                    .to_response(StatusCode::UNAUTHORIZED)
            }
            TokenError::TokenGenerationFailed | TokenError::MissingSigningSecret { .. } => {
                ErrorResponse::new("internal_error", "An internal error occurred")
                    .to_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        },

        DomainError::Database(_) | DomainError::Media { .. } | DomainError::Internal { .. } => {
            ErrorResponse::new("internal_error", "An internal error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
