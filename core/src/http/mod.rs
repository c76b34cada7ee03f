//! HTTP layer: controllers, security and error mapping.

pub mod controller;
pub mod error;
pub mod security;
