//! API key management.
//!
//! API keys are the credentials of the management REST API. Each key carries
//! a set of [`Role`]s; the roles decide which management permissions a caller
//! presenting the key holds.
//!
//! # Key Locations
//!
//! Keys are presented in the `Authorization` header:
//! `Authorization: ApiKey <plaintext>`.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use gateway_admin_core::http::security::api_key::{
//!     ApiKeyAuthenticator, ApiKeyService, InMemoryApiKeyService,
//! };
//!
//! let service = Arc::new(InMemoryApiKeyService::new());
//! let bootstrap = service.create(&["SYSTEM_ADMINISTRATOR".into()])?;
//! println!("bootstrap key: {}", bootstrap.key);
//!
//! let authenticator = ApiKeyAuthenticator::new(service.clone());
//! ```
//!
//! Plaintext keys are only handed out once, by `create`. The service keeps
//! the SHA-256 digest of the key and resolves presented keys by digest.

mod authenticator;
mod error;
mod key;
mod service;

pub use authenticator::ApiKeyAuthenticator;
pub use error::ApiKeyError;
pub use key::{encode_key, PersistentApiKey, PlaintextApiKey, PublicApiKeyData, Role};
pub use service::{ApiKeyService, InMemoryApiKeyService};
