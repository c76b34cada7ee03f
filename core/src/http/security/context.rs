//! Security context for accessing the current authenticated user.
//!
//! The context uses task-local storage: the security middleware opens a scope
//! for each request, so every suspension point of that request resumes with
//! the same principal. Code outside a scope sees no user.
//!
//! ```ignore
//! use gateway_admin_core::http::security::SecurityContext;
//!
//! fn current_username() -> Option<String> {
//!     SecurityContext::get_username()
//! }
//! ```

use std::cell::RefCell;

use crate::http::security::User;

tokio::task_local! {
    static SECURITY_CONTEXT: RefCell<Option<User>>;
}

/// Holder for the current security context.
pub struct SecurityContext;

impl SecurityContext {
    /// Gets the current authenticated user, if any.
    pub fn get_user() -> Option<User> {
        SECURITY_CONTEXT
            .try_with(|ctx| ctx.borrow().clone())
            .ok()
            .flatten()
    }

    /// Gets the current username if authenticated.
    pub fn get_username() -> Option<String> {
        Self::get_user().map(|u| u.get_username().to_string())
    }

    /// Runs a future with the given user bound to the security context.
    ///
    /// Used by the security middleware around the downstream service call.
    pub async fn run_with<F, R>(user: Option<User>, f: F) -> R
    where
        F: std::future::Future<Output = R>,
    {
        SECURITY_CONTEXT.scope(RefCell::new(user), f).await
    }

    /// Replaces the user in the current scope.
    ///
    /// Has no effect outside a `run_with` scope.
    pub fn set_user(user: Option<User>) {
        let _ = SECURITY_CONTEXT.try_with(|ctx| {
            *ctx.borrow_mut() = user;
        });
    }
}
