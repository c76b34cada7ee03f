//! REST controllers.

pub mod api_keys;

pub use api_keys::API_KEYS_V1_PATH;
