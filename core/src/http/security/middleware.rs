//! Security middleware for Actix Web.
//!
//! Authenticates each request, stores the user in the request extensions and
//! runs the downstream service inside a [`SecurityContext`] scope.

use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::http::security::config::Authenticator;
use crate::http::security::SecurityContext;

/// Security middleware factory.
///
/// # Example
/// ```ignore
/// App::new().wrap(SecurityTransform::new(ApiKeyAuthenticator::new(service.clone())))
/// ```
pub struct SecurityTransform<Auth> {
    authenticator: Auth,
}

impl<Auth> SecurityTransform<Auth> {
    pub fn new(authenticator: Auth) -> Self {
        SecurityTransform { authenticator }
    }
}

impl<S, B, Auth> Transform<S, ServiceRequest> for SecurityTransform<Auth>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator + Clone + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SecurityService<Auth, S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(SecurityService {
            authenticator: self.authenticator.clone(),
            service: Rc::new(service),
        })
    }
}

/// Security middleware service.
pub struct SecurityService<Auth, S> {
    authenticator: Auth,
    service: Rc<S>,
}

impl<Auth, S, B> Service<ServiceRequest> for SecurityService<Auth, S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
    Auth: Authenticator,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let user = self.authenticator.get_user(&req);

        if let Some(ref u) = user {
            tracing::debug!(user = %u.get_username(), path = %req.path(), "request authenticated");
            req.extensions_mut().insert(u.clone());
        }

        Box::pin(SecurityContext::run_with(user, async move {
            service.call(req).await
        }))
    }
}
