//! Audited management actions and the names of their data fields.

use std::fmt;

/// Management actions that produce an audit record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestApiAuditEvent {
    ApiKeyCreate,
    ApiKeyUpdate,
    ApiKeyRemove,
}

impl RestApiAuditEvent {
    /// Event name written to the audit log.
    pub fn as_str(&self) -> &'static str {
        match self {
            RestApiAuditEvent::ApiKeyCreate => "API_KEY_CREATE",
            RestApiAuditEvent::ApiKeyUpdate => "API_KEY_UPDATE",
            RestApiAuditEvent::ApiKeyRemove => "API_KEY_REMOVE",
        }
    }
}

impl fmt::Display for RestApiAuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RestApiAuditEvent> for String {
    fn from(event: RestApiAuditEvent) -> Self {
        event.as_str().to_string()
    }
}

/// Field names used in audit data.
pub mod property {
    pub const API_KEY_ID: &str = "API key ID";
    pub const API_KEY_ROLES: &str = "API key roles";
}
