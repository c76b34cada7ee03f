use actix_web::{error, http::StatusCode, HttpResponse};
use derive_more::{Display, Error};

/// Authentication and authorization failures.
#[derive(Debug, Display, Error)]
pub enum AuthError {
    /// No authenticated user is bound to the request.
    #[display("unauthorized")]
    Unauthorized,
    /// The user lacks the permission required by the operation.
    #[display("forbidden: missing permission {permission}")]
    Forbidden {
        #[error(not(source))]
        permission: String,
    },
}

impl AuthError {
    pub fn forbidden(permission: impl Into<String>) -> Self {
        AuthError::Forbidden {
            permission: permission.into(),
        }
    }
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
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
