//! Audit logging of management actions.
//!
//! Each mutating management request records one audit event: which action
//! ran, who ran it, the data it touched and, on failure, why it failed.
//!
//! # Components
//!
//! - [`AuditEventRecorder`] - per-request accumulator, emits at most once
//! - [`Auditor`] - shared logger and principal resolver, creates recorders
//! - [`AuditTransform`] / [`RequestAudit`] - route interception and the
//!   handler-side extractor
//! - [`AuditEventLogger`] - logging collaborator ([`TracingAuditLogger`],
//!   [`FileAuditLogger`], [`InMemoryAuditLog`])
//!
//! # Example
//!
//! ```ignore
//! use gateway_admin_core::http::security::audit::{Auditor, TracingAuditLogger};
//!
//! let auditor = Auditor::new(TracingAuditLogger);
//! let mut recorder = auditor.recorder();
//! recorder.begin("API_KEY_CREATE");
//! recorder.add_data("API key ID", 5);
//! recorder.log_success();
//! recorder.log_success(); // no second record
//! ```

mod event;
mod interceptor;
mod logger;
mod record;
mod recorder;

pub use event::{property, RestApiAuditEvent};
pub use interceptor::{AuditService, AuditTransform, RequestAudit};
pub use logger::{
    AuditEventLogger, FileAuditLogger, InMemoryAuditLog, TracingAuditLogger, AUDIT_TARGET,
};
pub use record::{AuditDataMap, AuditLogError, AuditRecord};
pub use recorder::{
    AuditEventRecorder, Auditor, PrincipalResolver, SecurityContextPrincipal, ANONYMOUS,
};
