//! Extractors for accessing the authenticated user in handlers.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthError;
use crate::http::security::permission::Permission;
use crate::http::security::User;

/// Extractor for the authenticated user.
///
/// ```ignore
/// async fn handler(user: AuthenticatedUser) -> Result<impl Responder, AuthError> {
///     user.require(Permission::ViewApiKeys)?;
///     Ok(format!("Hello, {}!", user.get_username()))
/// }
/// ```
///
/// # Errors
/// Returns `401 Unauthorized` if the user is not authenticated.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(User);

impl AuthenticatedUser {
    /// Fails with `403 Forbidden` unless the user holds `permission`.
    pub fn require(&self, permission: Permission) -> Result<(), AuthError> {
        if self.0.has_authority(permission.as_str()) {
            Ok(())
        } else {
            Err(AuthError::forbidden(permission.as_str()))
        }
    }
}

impl Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<User>().cloned() {
            Some(user) => ready(Ok(AuthenticatedUser(user))),
            None => ready(Err(AuthError::Unauthorized)),
        }
    }
}
