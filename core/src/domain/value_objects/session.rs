//! Authenticated session value object.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;

/// Result of a successful login or refresh: the account together with the
/// freshly issued token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedSession {
    /// The authenticated account, with its refresh-token slot already
    /// reflecting the newly issued token
    pub user: User,

    /// Newly issued access + refresh tokens
    pub tokens: TokenPair,
}
