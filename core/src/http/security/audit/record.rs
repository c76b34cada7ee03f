//! The emitted audit record.

use std::collections::BTreeMap;

use derive_more::{Display, Error, From};
use serde::Serialize;

/// Named data fields attached to an audit event.
pub type AuditDataMap = BTreeMap<String, serde_json::Value>;

/// Snapshot of one audited action, as handed to an [`AuditEventLogger`].
///
/// Serialized as a single JSON object:
/// `{"event":"API_KEY_CREATE","user":"admin","data":{"API key ID":5}}`.
/// `reason` is only present for failures.
///
/// [`AuditEventLogger`]: super::AuditEventLogger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub event: String,
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub data: AuditDataMap,
}

impl AuditRecord {
    pub fn success(event: impl Into<String>, user: impl Into<String>, data: AuditDataMap) -> Self {
        AuditRecord {
            event: event.into(),
            user: user.into(),
            reason: None,
            data,
        }
    }

    pub fn failure(
        event: impl Into<String>,
        user: impl Into<String>,
        reason: impl Into<String>,
        data: AuditDataMap,
    ) -> Self {
        AuditRecord {
            event: event.into(),
            user: user.into(),
            reason: Some(reason.into()),
            data,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.reason.is_some()
    }

    pub fn to_json(&self) -> Result<String, AuditLogError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Failure of a logging collaborator. Never propagated past the recorder.
#[derive(Debug, Display, Error, From)]
pub enum AuditLogError {
    #[display("audit log write failed: {_0}")]
    Io(std::io::Error),
    #[display("audit record serialization failed: {_0}")]
    Serialization(serde_json::Error),
}
