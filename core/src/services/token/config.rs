//! Configuration for the token service

use cs_shared::config::JwtConfig;

/// Configuration for the token service
///
/// Each token kind has a dedicated signing secret and expiry.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Signing secret for access tokens
    pub access_secret: String,
    /// Signing secret for refresh tokens
    pub refresh_secret: String,
    /// Access token expiry in seconds
    pub access_token_expiry: i64,
    /// Refresh token expiry in seconds
    pub refresh_token_expiry: i64,
    /// Issuer claim embedded in every token
    pub issuer: String,
    /// Audience claim embedded in every token
    pub audience: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::from(JwtConfig::default())
    }
}

impl From<JwtConfig> for TokenConfig {
    fn from(jwt: JwtConfig) -> Self {
        Self {
            access_secret: jwt.access_secret,
            refresh_secret: jwt.refresh_secret,
            access_token_expiry: jwt.access_token_expiry,
            refresh_token_expiry: jwt.refresh_token_expiry,
            issuer: jwt.issuer,
            audience: jwt.audience,
        }
    }
}
