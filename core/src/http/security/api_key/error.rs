//! API key management error types.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::{Display, Error};

/// Domain errors raised by the key management service.
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum ApiKeyError {
    /// A role name is unknown, or no role was given.
    #[display("invalid role: {reason}")]
    InvalidRole {
        #[error(not(source))]
        reason: String,
    },

    /// No API key exists with the given id.
    #[display("api key with id {id} not found")]
    NotFound {
        #[error(not(source))]
        id: u64,
    },
}

impl ApiKeyError {
    pub fn invalid_role(reason: impl Into<String>) -> Self {
        ApiKeyError::InvalidRole {
            reason: reason.into(),
        }
    }

    pub fn not_found(id: u64) -> Self {
        ApiKeyError::NotFound { id }
    }
}

impl ResponseError for ApiKeyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiKeyError::InvalidRole { .. } => StatusCode::BAD_REQUEST,
            ApiKeyError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.to_string(),
        }))
    }
}
