//! Token issuance and verification

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::errors::{DomainError, TokenError};

use super::config::TokenConfig;

/// Service issuing and verifying JWT access and refresh tokens
///
/// Issuance and verification are pure functions of the configuration and the
/// input: the service performs no I/O. Persisting the refresh token is the
/// account service's concern.
pub struct TokenService {
    config: TokenConfig,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// Fails if either signing secret is absent.
    pub fn new(config: TokenConfig) -> Result<Self, DomainError> {
        if config.access_secret.is_empty() {
            return Err(DomainError::Token(TokenError::MissingSigningSecret {
                kind: "access",
            }));
        }
        if config.refresh_secret.is_empty() {
            return Err(DomainError::Token(TokenError::MissingSigningSecret {
                kind: "refresh",
            }));
        }

        let access_encoding = EncodingKey::from_secret(config.access_secret.as_bytes());
        let access_decoding = DecodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_encoding = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Ok(Self {
            config,
            access_encoding,
            access_decoding,
            refresh_encoding,
            refresh_decoding,
            validation,
        })
    }

    /// Issues a new access token for the given account
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let claims = Claims::new(
            user_id,
            Duration::seconds(self.config.access_token_expiry),
            &self.config.issuer,
            &self.config.audience,
        );
        self.encode_jwt(&claims, &self.access_encoding)
    }

    /// Issues a new refresh token for the given account
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let claims = Claims::new(
            user_id,
            Duration::seconds(self.config.refresh_token_expiry),
            &self.config.issuer,
            &self.config.audience,
        );
        self.encode_jwt(&claims, &self.refresh_encoding)
    }

    /// Issues a fresh access + refresh token pair
    pub fn issue_pair(&self, user_id: Uuid) -> Result<TokenPair, DomainError> {
        let access_token = self.issue_access_token(user_id)?;
        let refresh_token = self.issue_refresh_token(user_id)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry,
            self.config.refresh_token_expiry,
        ))
    }

    /// Verifies an access token and returns the claims
    ///
    /// Rejects tokens with an invalid signature, malformed structure, or
    /// expired timestamp, each as a distinct error.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.decode_jwt(token, &self.access_decoding)
    }

    /// Verifies a refresh token and returns the claims
    ///
    /// Cryptographic validity only; equality with the account's stored token
    /// is enforced by the caller.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.decode_jwt(token, &self.refresh_decoding)
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims, key: &EncodingKey) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, key).map_err(|e| {
            tracing::error!(error = %e, "token encoding failed");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Decodes a JWT, mapping failure kinds onto the domain taxonomy
    fn decode_jwt(&self, token: &str, key: &DecodingKey) -> Result<Claims, DomainError> {
        use jsonwebtoken::errors::ErrorKind;

        let token_data = decode::<Claims>(token, key, &self.validation).map_err(|e| {
            let token_error = match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => TokenError::InvalidClaims,
                _ => TokenError::Malformed,
            };
            DomainError::Token(token_error)
        })?;

        Ok(token_data.claims)
    }
}
