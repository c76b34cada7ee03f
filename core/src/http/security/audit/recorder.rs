//! Request-scoped audit event recorder.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::logger::AuditEventLogger;
use super::record::AuditDataMap;
use crate::http::security::SecurityContext;

/// Principal attributed to records when nobody is authenticated.
pub const ANONYMOUS: &str = "anonymous";

/// Resolves the principal an audit record is attributed to.
pub trait PrincipalResolver: Send + Sync {
    fn current_principal(&self) -> String;
}

/// Reads the principal from the task-local [`SecurityContext`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SecurityContextPrincipal;

impl PrincipalResolver for SecurityContextPrincipal {
    fn current_principal(&self) -> String {
        SecurityContext::get_username().unwrap_or_else(|| ANONYMOUS.to_string())
    }
}

impl<F> PrincipalResolver for F
where
    F: Fn() -> String + Send + Sync,
{
    fn current_principal(&self) -> String {
        self()
    }
}

/// Shared audit wiring: the logging collaborator and the identity
/// collaborator. Cheap to clone; hands out one recorder per request.
#[derive(Clone)]
pub struct Auditor {
    logger: Arc<dyn AuditEventLogger>,
    principal: Arc<dyn PrincipalResolver>,
}

impl Auditor {
    /// Uses the security context to resolve principals.
    pub fn new<L: AuditEventLogger + 'static>(logger: L) -> Self {
        Self::from_shared(Arc::new(logger))
    }

    pub fn from_shared(logger: Arc<dyn AuditEventLogger>) -> Self {
        Auditor {
            logger,
            principal: Arc::new(SecurityContextPrincipal),
        }
    }

    pub fn principal_resolver<P: PrincipalResolver + 'static>(mut self, resolver: P) -> Self {
        self.principal = Arc::new(resolver);
        self
    }

    /// A fresh recorder for one request.
    pub fn recorder(&self) -> AuditEventRecorder {
        AuditEventRecorder {
            event_name: None,
            data: AuditDataMap::new(),
            logged: false,
            logger: Arc::clone(&self.logger),
            principal: Arc::clone(&self.principal),
        }
    }
}

/// Accumulates one named audit event and its data for a single request and
/// emits it at most once.
///
/// - the first `begin` names the event; later names are ignored
/// - without a name, nothing is ever emitted
/// - the principal is resolved when the record is emitted, not when the
///   recorder is created
/// - a logger failure is reported through `tracing` and otherwise swallowed
pub struct AuditEventRecorder {
    event_name: Option<String>,
    data: AuditDataMap,
    logged: bool,
    logger: Arc<dyn AuditEventLogger>,
    principal: Arc<dyn PrincipalResolver>,
}

impl AuditEventRecorder {
    pub fn begin(&mut self, event_name: impl Into<String>) {
        let event_name = event_name.into();
        match &self.event_name {
            None => self.event_name = Some(event_name),
            Some(current) if *current == event_name => {}
            Some(current) => {
                tracing::warn!(
                    current = %current,
                    ignored = %event_name,
                    "audit event already started, keeping the first name"
                );
            }
        }
    }

    /// Inserts or replaces a data field.
    pub fn add_data(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn event_name(&self) -> Option<&str> {
        self.event_name.as_deref()
    }

    pub fn data(&self) -> &AuditDataMap {
        &self.data
    }

    pub fn has_logged(&self) -> bool {
        self.logged
    }

    pub fn log_success(&mut self) {
        self.flush(None);
    }

    pub fn log_failure(&mut self, error: impl fmt::Display) {
        self.flush(Some(error.to_string()));
    }

    fn flush(&mut self, reason: Option<String>) {
        if self.logged {
            return;
        }
        let event = match self.event_name.as_deref() {
            Some(event) => event,
            None => return,
        };
        self.logged = true;

        let principal = self.principal.current_principal();
        let result = match reason {
            None => self.logger.log_success(event, &principal, &self.data),
            Some(ref reason) => self.logger.log_failure(event, &principal, reason, &self.data),
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, event = %event, user = %principal, "failed to write audit record");
        }
    }
}

impl fmt::Debug for AuditEventRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditEventRecorder")
            .field("event_name", &self.event_name)
            .field("data", &self.data)
            .field("logged", &self.logged)
            .finish()
    }
}
