use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::services::auth_service::{bearer_token, TokenVerifier};
use crate::utils::AppError;

pub use crate::services::auth_service::Claims;

/// Rejects requests without a valid bearer token and stores the decoded
/// [`Claims`] in the request extensions for `web::ReqData<Claims>`.
pub struct AuthMiddleware {
    verifier: Rc<TokenVerifier>,
}

impl AuthMiddleware {
    pub fn new(verifier: TokenVerifier) -> Self {
        Self {
            verifier: Rc::new(verifier),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            verifier: Rc::clone(&self.verifier),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    verifier: Rc<TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = match req.headers().get("Authorization") {
            Some(header_value) => match header_value.to_str().ok().and_then(bearer_token) {
                Some(token) => self.verifier.verify(token),
                None => Err(AppError::Unauthorized("Invalid token format".to_string())),
            },
            None => Err(AppError::Unauthorized("Missing authorization token".to_string())),
        };

        match claims {
            Ok(claims) => {
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(e) => {
                log::warn!("🔒 {} {} rejected: {}", req.method(), req.path(), e);
                // Answered here rather than as Err so outer middleware still
                // sees a response to decorate
                let res = req.into_response(e.error_response()).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}
