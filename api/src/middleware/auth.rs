//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the access token from the `accessToken` cookie or the
//! `Authorization: Bearer` header, resolves the account through the
//! `RequestAuthenticator` in app data, and injects it into the request
//! extensions. Protected handlers receive it via the `CurrentUser`
//! extractor.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorInternalServerError, ErrorUnauthorized},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use cs_core::domain::entities::user::User;
use cs_core::errors::DomainError;
use cs_core::repositories::UserRepository;
use cs_core::services::{AccountService, MediaStore};

/// Name of the cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Name of the cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// The account resolved for the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Trait for resolving an account from an access token
///
/// Allows the middleware to call the account service through dynamic
/// dispatch regardless of its repository and media-store type parameters.
#[async_trait]
pub trait RequestAuthenticator: Send + Sync {
    async fn authenticate(&self, access_token: &str) -> Result<User, DomainError>;
}

#[async_trait]
impl<U, M> RequestAuthenticator for AccountService<U, M>
where
    U: UserRepository + 'static,
    M: MediaStore + 'static,
{
    async fn authenticate(&self, access_token: &str) -> Result<User, DomainError> {
        AccountService::authenticate(self, access_token).await
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth;

impl JwtAuth {
    /// Creates a new JWT authentication middleware
    pub fn new() -> Self {
        Self
    }
}

impl Default for JwtAuth {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let token = match extract_access_token(&req) {
                Some(token) => token,
                None => {
                    return Err(ErrorUnauthorized("Missing access token"));
                }
            };

            let authenticator = req
                .app_data::<web::Data<Arc<dyn RequestAuthenticator>>>()
                .cloned()
                .ok_or_else(|| ErrorInternalServerError("authentication not configured"))?;

            match authenticator.authenticate(&token).await {
                Ok(user) => {
                    req.extensions_mut().insert(CurrentUser(user));
                    service.call(req).await
                }
                Err(error) => {
                    log::warn!("request authentication failed: {}", error);
                    Err(ErrorUnauthorized(format!("Invalid access token: {}", error)))
                }
            }
        })
    }
}

/// Extracts the access token from the cookie or the Authorization header
fn extract_access_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(ACCESS_TOKEN_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
