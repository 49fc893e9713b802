//! Ledger service
//!
//! Submits counted ledgers as records, loads an owner's history as a
//! timeline, and deletes records, writing an audit entry for each change.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{
    civil_now, format_civil, LedgerRecord, LineItem, NewLedgerRecord, RecordId,
    Session,
};
use crate::storage::{RecordStore, Storage};
use crate::timeline::TimelineView;

/// Service for saving and browsing ledger records
pub struct LedgerService<'a> {
    store: &'a dyn RecordStore,
    audit: Option<&'a AuditLogger>,
}

impl<'a> LedgerService<'a> {
    /// Create a service over any record store, without auditing
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self { store, audit: None }
    }

    /// Create a service over the JSON storage, auditing if it is enabled
    pub fn from_storage(storage: &'a Storage) -> Self {
        Self {
            store: &storage.records,
            audit: storage.audit(),
        }
    }

    /// Validate a ledger and save its non-zero lines as one record
    ///
    /// Fails with `InvalidInput` or `EmptySubmission` before anything is
    /// sent to the store; store errors are returned unchanged.
    pub fn submit(
        &self,
        session: &Session,
        ledger: &Ledger,
        note: Option<&str>,
    ) -> LedgerResult<LedgerRecord> {
        self.submit_stamped(session, ledger, note, civil_now())
    }

    /// Same as [`submit`](Self::submit) with an explicit submission time
    pub fn submit_at(
        &self,
        session: &Session,
        ledger: &Ledger,
        note: Option<&str>,
        now: DateTime<Utc>,
    ) -> LedgerResult<LedgerRecord> {
        self.submit_stamped(session, ledger, note, format_civil(now))
    }

    fn submit_stamped(
        &self,
        session: &Session,
        ledger: &Ledger,
        note: Option<&str>,
        timestamp: String,
    ) -> LedgerResult<LedgerRecord> {
        let lines = ledger.validate_and_parse()?;
        if lines.is_empty() {
            return Err(LedgerError::EmptySubmission);
        }

        let request = NewLedgerRecord {
            note: note.map(str::to_string),
            timestamp: Some(timestamp),
            lines: lines.into_iter().map(LineItem::from).collect(),
        };

        let record = self.store.create(session, request)?;
        info!(
            record = %record.id,
            lines = record.lines.len(),
            total = record.total().units(),
            "Submitted ledger"
        );

        self.audit(AuditEntry::create(&record));
        Ok(record)
    }

    /// Load the owner's records as a newest-first timeline
    pub fn timeline(&self, session: &Session) -> LedgerResult<TimelineView> {
        let records = self.store.list(session)?;
        Ok(TimelineView::build(records))
    }

    /// Delete one of the owner's records
    pub fn delete(&self, session: &Session, id: RecordId) -> LedgerResult<LedgerRecord> {
        let removed = self.store.delete(session, id)?;
        self.audit(AuditEntry::delete(&removed));
        Ok(removed)
    }

    // The record is already persisted at this point; an audit failure must
    // not turn a completed change into an error.
    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, record = %entry.record_id, "Failed to write audit entry");
            }
        }
    }
}
