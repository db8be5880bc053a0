//! Authentication configuration: JWT signing and session cookies

use serde::{Deserialize, Serialize};

use super::environment::Environment;

const DEFAULT_ACCESS_SECRET: &str = "dev-access-secret-change-in-production";
const DEFAULT_REFRESH_SECRET: &str = "dev-refresh-secret-change-in-production";

/// JWT authentication configuration
///
/// Access and refresh tokens are signed with independent secrets and carry
/// independent expiries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Signing secret for access tokens
    pub access_secret: String,

    /// Signing secret for refresh tokens
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_ACCESS_SECRET),
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            access_token_expiry: 900,      // 15 minutes
            refresh_token_expiry: 864_000, // 10 days
            issuer: String::from("clipstream"),
            audience: String::from("clipstream-api"),
        }
    }
}

impl JwtConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let access_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .unwrap_or_else(|_| DEFAULT_ACCESS_SECRET.to_string());
        let refresh_secret = std::env::var("REFRESH_TOKEN_SECRET")
            .unwrap_or_else(|_| DEFAULT_REFRESH_SECRET.to_string());
        let access_token_expiry = std::env::var("ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(900);
        let refresh_token_expiry = std::env::var("REFRESH_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(864_000);

        Self {
            access_secret,
            refresh_secret,
            access_token_expiry,
            refresh_token_expiry,
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86_400;
        self
    }

    /// Check if still using a default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }
}

/// Session cookie configuration
///
/// Applied to the `accessToken` and `refreshToken` cookies set at login and
/// refresh.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie Secure flag (HTTPS only)
    pub secure: bool,

    /// Cookie HttpOnly flag
    pub http_only: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: false, // Set to true in production
            http_only: true,
        }
    }
}

impl CookieConfig {
    /// Derive cookie flags from the runtime environment
    pub fn for_environment(env: Environment) -> Self {
        Self {
            secure: env.is_production(),
            http_only: true,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env(env: Environment) -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            cookie: CookieConfig::for_environment(env),
        }
    }
}
