//! API key authenticator implementation.

use std::sync::Arc;

use actix_web::dev::ServiceRequest;
use actix_web::http::header;

use super::service::ApiKeyService;
use crate::http::security::permission::Permission;
use crate::http::security::{Authenticator, User};

const SCHEME: &str = "ApiKey";

/// Authenticator that resolves `Authorization: ApiKey <key>` against an
/// [`ApiKeyService`].
///
/// The resulting user is named `api-key-<id>`, carries the key's roles, and
/// the authorities those roles grant.
pub struct ApiKeyAuthenticator<S: ApiKeyService + ?Sized> {
    service: Arc<S>,
}

impl<S: ApiKeyService + ?Sized> ApiKeyAuthenticator<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    fn extract_key(req: &ServiceRequest) -> Option<&str> {
        let auth = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
        let (scheme, token) = auth.split_once(' ')?;
        if scheme.eq_ignore_ascii_case(SCHEME) {
            Some(token.trim())
        } else {
            None
        }
    }
}

impl<S: ApiKeyService + ?Sized> Authenticator for ApiKeyAuthenticator<S> {
    fn get_user(&self, req: &ServiceRequest) -> Option<User> {
        let key_value = Self::extract_key(req)?;
        let api_key = self.service.find_by_plaintext(key_value)?;

        Some(
            User::new(format!("api-key-{}", api_key.id))
                .roles(&api_key.role_names())
                .authorities(&Permission::authorities_for(&api_key.role_list())),
        )
    }
}

impl<S: ApiKeyService + ?Sized> Clone for ApiKeyAuthenticator<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}
