//! Password hashing helpers

use crate::errors::DomainError;

/// Hash a plaintext password with bcrypt
pub(crate) fn hash_password(plain: &str, cost: u32) -> Result<String, DomainError> {
    bcrypt::hash(plain, cost).map_err(|e| DomainError::Internal {
        message: format!("password hashing failed: {}", e),
    })
}

/// Verify a plaintext password against a stored bcrypt hash
pub(crate) fn verify_password(plain: &str, hash: &str) -> Result<bool, DomainError> {
    bcrypt::verify(plain, hash).map_err(|e| DomainError::Internal {
        message: format!("password verification failed: {}", e),
    })
}
