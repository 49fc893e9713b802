//! Storage layer for Cash Ledger
//!
//! Defines the [`RecordStore`] contract the rest of the crate persists
//! through, and a JSON file implementation with atomic writes.

pub mod file_io;
pub mod records;

pub use file_io::{read_json, write_json_atomic};
pub use records::RecordRepository;

use crate::audit::AuditLogger;
use crate::config::paths::LedgerPaths;
use crate::error::LedgerResult;
use crate::models::{LedgerRecord, NewLedgerRecord, RecordId, Session};

/// Persistence for ledger records
///
/// Every call is scoped to the session's owner. Implementations fail with
/// `Unauthorized` when the session has no owner, `NotFound` when deleting a
/// record the owner does not have, and `Storage` for any backend failure. A
/// failed `create` must leave nothing behind.
pub trait RecordStore {
    /// Persist a new record, assigning its ID, owner and creation time
    fn create(&self, session: &Session, record: NewLedgerRecord) -> LedgerResult<LedgerRecord>;

    /// The owner's records, most recently created first
    fn list(&self, session: &Session) -> LedgerResult<Vec<LedgerRecord>>;

    /// Delete one of the owner's records and return it
    fn delete(&self, session: &Session, id: RecordId) -> LedgerResult<LedgerRecord>;
}

/// Storage coordinator: the record repository plus the audit log
pub struct Storage {
    paths: LedgerPaths,
    pub records: RecordRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            records: RecordRepository::new(paths.records_file()),
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths,
        })
    }

    /// Turn off audit logging
    pub fn without_audit(mut self) -> Self {
        self.audit = None;
        self
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// The audit logger, if auditing is on
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load all data from disk
    pub fn load_all(&self) -> LedgerResult<()> {
        self.records.load()
    }
}
