//! Core of the security gateway management console.
//!
//! - [`env`] - database properties remapping into the runtime environment
//! - [`http::security`] - authentication, permissions and audit logging
//! - [`http::controller`] - REST controllers (API key management)
//! - [`http::error`] - HTTP error types

pub mod env;
pub mod http;
