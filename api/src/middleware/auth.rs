//! Bearer token authentication middleware for member endpoints.
//!
//! The middleware extracts the token from the Authorization header,
//! resolves it to a user through the identity resolver and injects the
//! user into the request as [`CurrentUser`]. Every rejection, whatever
//! stage it happens at, produces the same 401 response.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use mp_core::{
    domain::entities::user::User,
    errors::AuthError,
    repositories::UserRepository,
    services::{
        cache::CacheStore,
        identity::{IdentityResolver, ResolvedIdentity},
    },
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use tracing::debug;

use crate::handlers::error::ApiError;

/// The authenticated user of the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn user(&self) -> &User {
        &self.0
    }
}

/// Trait for wrapping the identity resolver to allow dynamic dispatch
#[async_trait]
pub trait IdentityResolverWrapper: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<ResolvedIdentity, AuthError>;
}

#[async_trait]
impl<U, C> IdentityResolverWrapper for IdentityResolver<U, C>
where
    U: UserRepository + 'static,
    C: CacheStore + 'static,
{
    async fn resolve(&self, token: &str) -> Result<ResolvedIdentity, AuthError> {
        IdentityResolver::resolve(self, token).await
    }
}

/// Authentication middleware factory
#[derive(Clone)]
pub struct AuthGate {
    resolver: Arc<dyn IdentityResolverWrapper>,
}

impl AuthGate {
    pub fn new(resolver: Arc<dyn IdentityResolverWrapper>) -> Self {
        Self { resolver }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service: Rc::new(service),
            resolver: Arc::clone(&self.resolver),
        }))
    }
}

/// Authentication middleware service
pub struct AuthGateMiddleware<S> {
    service: Rc<S>,
    resolver: Arc<dyn IdentityResolverWrapper>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let resolver = Arc::clone(&self.resolver);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    debug!(path = %req.path(), "Missing or malformed Authorization header");
                    return Ok(reject(req));
                }
            };

            let resolved = match resolver.resolve(&token).await {
                Ok(resolved) => resolved,
                Err(e) => {
                    debug!(path = %req.path(), reason = %e, "Rejected request");
                    return Ok(reject(req));
                }
            };

            req.extensions_mut().insert(CurrentUser(resolved.user));

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

fn reject<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    req.into_response(ApiError::Unauthorized.error_response())
        .map_into_right_body()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .map(|s| s.to_string())
}

/// Extractor for the authenticated user
impl FromRequest for CurrentUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized);

        ready(result)
    }
}
