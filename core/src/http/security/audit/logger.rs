//! Logging collaborators that receive audit records.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::record::{AuditDataMap, AuditLogError, AuditRecord};

/// Tracing target of audit records emitted by [`TracingAuditLogger`].
pub const AUDIT_TARGET: &str = "audit";

/// Receives audit records.
///
/// The recorder ignores the returned error apart from a diagnostic warning,
/// and makes no assumption that logging is synchronous or durable.
pub trait AuditEventLogger: Send + Sync {
    fn log(&self, record: &AuditRecord) -> Result<(), AuditLogError>;

    fn log_success(
        &self,
        event: &str,
        principal: &str,
        data: &AuditDataMap,
    ) -> Result<(), AuditLogError> {
        self.log(&AuditRecord::success(event, principal, data.clone()))
    }

    fn log_failure(
        &self,
        event: &str,
        principal: &str,
        reason: &str,
        data: &AuditDataMap,
    ) -> Result<(), AuditLogError> {
        self.log(&AuditRecord::failure(event, principal, reason, data.clone()))
    }
}

/// Emits each record as a JSON line on the `audit` tracing target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditLogger;

impl TracingAuditLogger {
    pub fn new() -> Self {
        TracingAuditLogger
    }
}

impl AuditEventLogger for TracingAuditLogger {
    fn log(&self, record: &AuditRecord) -> Result<(), AuditLogError> {
        let json = record.to_json()?;
        if record.is_failure() {
            tracing::warn!(target: AUDIT_TARGET, event = %record.event, user = %record.user, "{}", json);
        } else {
            tracing::info!(target: AUDIT_TARGET, event = %record.event, user = %record.user, "{}", json);
        }
        Ok(())
    }
}

/// Appends each record as a JSON line to a file.
///
/// Records are serialized on the caller's thread and handed to a dedicated
/// writer thread, which appends and syncs them in order. Dropping the logger
/// drains the queue and waits for the writer to finish.
pub struct FileAuditLogger {
    sender: Option<mpsc::UnboundedSender<String>>,
    writer: Option<JoinHandle<()>>,
    path: PathBuf,
}

impl FileAuditLogger {
    /// Opens `path` for appending, creating the parent directory if needed.
    pub fn new(path: &Path) -> Result<Self, AuditLogError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!(path = %parent.display(), "creating audit log directory");
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        debug!(path = %path.display(), "audit log opened");

        let (sender, receiver) = mpsc::unbounded_channel();
        let writer = thread::Builder::new()
            .name("audit-writer".into())
            .spawn(move || write_lines(file, receiver))?;

        Ok(Self {
            sender: Some(sender),
            writer: Some(writer),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_lines(mut file: File, mut receiver: mpsc::UnboundedReceiver<String>) {
    while let Some(line) = receiver.blocking_recv() {
        if let Err(e) = writeln!(file, "{}", line) {
            warn!(error = %e, "failed to write audit record");
            continue;
        }
        if let Err(e) = file.sync_data() {
            warn!(error = %e, "failed to sync audit log");
        }
    }
}

impl AuditEventLogger for FileAuditLogger {
    fn log(&self, record: &AuditRecord) -> Result<(), AuditLogError> {
        let json = record.to_json()?;
        self.sender
            .as_ref()
            .ok_or_else(writer_stopped)?
            .send(json)
            .map_err(|_| writer_stopped())?;
        Ok(())
    }
}

fn writer_stopped() -> AuditLogError {
    io::Error::new(io::ErrorKind::BrokenPipe, "audit writer stopped").into()
}

impl Drop for FileAuditLogger {
    fn drop(&mut self) {
        self.sender.take();
        if let Some(writer) = self.writer.take() {
            if writer.join().is_err() {
                warn!(path = %self.path.display(), "audit writer panicked");
            }
        }
    }
}

/// Keeps records in memory, for tests and inspection.
#[derive(Debug, Default, Clone)]
pub struct InMemoryAuditLog {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.lock().clone()
    }

    pub fn records_for_event(&self, event: &str) -> Vec<AuditRecord> {
        self.lock()
            .iter()
            .filter(|r| r.event == event)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AuditRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AuditEventLogger for InMemoryAuditLog {
    fn log(&self, record: &AuditRecord) -> Result<(), AuditLogError> {
        self.lock().push(record.clone());
        Ok(())
    }
}
