//! Domain-specific error types for authentication and account operations
//!
//! HTTP status mapping happens at the API boundary; these types only
//! classify the failure.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Authentication required")]
    MissingAuthentication,
}

/// Token-related errors
///
/// Signature, structure, and expiry failures are distinct so callers can
/// decide between prompting a re-login and refusing outright.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Malformed token")]
    Malformed,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token already rotated or revoked")]
    RefreshTokenReused,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Missing signing secret for {kind} tokens")]
    MissingSigningSecret { kind: &'static str },
}

/// Validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field required: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Duplicate value: {field}")]
    DuplicateValue { field: String },
}
