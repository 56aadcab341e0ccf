//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the bearer token from the Authorization header,
//! verifies it through an [`AccessVerifier`] and injects an [`AuthContext`]
//! into the request. Failures are answered directly with the JSON error body
//! (`MISSING_TOKEN`, `TOKEN_EXPIRED`, `INVALID_TOKEN`, `USER_NOT_FOUND`).

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use rg_core::{
    domain::entities::user::User,
    domain::value_objects::UserProfile,
    errors::{DomainError, DomainResult, TokenError},
    repositories::{TokenBlacklistRepository, UserRepository},
    services::token::TokenService,
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::ApiError;

/// Authenticated caller, available to handlers behind [`JwtAuth`]
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: UserProfile,
    /// The verified access token, kept so handlers can revoke it
    pub access_token: String,
}

/// Verifies access tokens for the middleware
///
/// Lets the middleware stay independent of the repository types behind the
/// token service.
#[async_trait]
pub trait AccessVerifier: Send + Sync {
    async fn verify(&self, token: Option<&str>) -> DomainResult<User>;
}

#[async_trait]
impl<U, B> AccessVerifier for TokenService<U, B>
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
{
    async fn verify(&self, token: Option<&str>) -> DomainResult<User> {
        self.verify_access(token).await
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    verifier: Arc<dyn AccessVerifier>,
}

impl JwtAuth {
    pub fn new(verifier: Arc<dyn AccessVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: self.verifier.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn AccessVerifier>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
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
        let verifier = self.verifier.clone();

        Box::pin(async move {
            let token = extract_bearer_token(req.headers()).map(str::to_string);

            let user = match verifier.verify(token.as_deref()).await {
                Ok(user) => user,
                Err(e) => {
                    log::debug!("Rejected request to {}: {}", req.path(), e);
                    // Answered here so outer middleware (CORS) still decorates the 401
                    return Ok(req
                        .error_response(ApiError::from(e))
                        .map_into_right_body());
                }
            };

            req.extensions_mut().insert(AuthContext {
                user: user.profile(),
                access_token: token.unwrap_or_default(),
            });

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extracts the bearer token from an Authorization header
///
/// Returns `None` for a missing header, another scheme or an empty token.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(DomainError::from(TokenError::MissingToken)).into());

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(req.headers()), Some("test_token_123"));

        let basic = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(basic.headers()), None);

        let empty = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer   "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(empty.headers()), None);

        let missing = TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(missing.headers()), None);
    }
}
