//! Authentication seam used by the security middleware.

use actix_web::dev::ServiceRequest;

use crate::http::security::user::User;

/// Extracts the user identity from an HTTP request.
///
/// Returns an owned `User` so it can be stored in request extensions and in
/// the task-local [`SecurityContext`](crate::http::security::SecurityContext).
pub trait Authenticator {
    /// Attempts to authenticate the request and returns the user if successful.
    fn get_user(&self, req: &ServiceRequest) -> Option<User>;
}
