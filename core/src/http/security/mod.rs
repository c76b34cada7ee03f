//! Security module: authentication, permissions and audit logging.
//!
//! # Module Structure
//!
//! - `api_key` - API keys, roles, the key management service and the API key authenticator
//! - `audit` - per-request audit event recording and logging collaborators
//! - `config` - Authenticator trait
//! - `context` - task-local security context (current principal)
//! - `extractor` - Actix Web extractors (AuthenticatedUser)
//! - `middleware` - Security middleware (SecurityTransform)
//! - `permission` - named permissions and the role grant table
//! - `user` - User model

pub use config::Authenticator;
pub use context::SecurityContext;
pub use extractor::AuthenticatedUser;
pub use middleware::SecurityTransform;
pub use permission::Permission;
pub use user::User;

mod config;
mod extractor;
mod user;

pub mod api_key;
pub mod audit;
pub mod context;
pub mod middleware;
pub mod permission;
