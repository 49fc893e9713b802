//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Amount, LedgerRecord};

/// Types of operations that can be audited
///
/// Records are immutable, so there is no update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Short display ID of the affected record
    pub record_id: String,

    /// Owner of the affected record
    pub owner: String,

    /// Grand total of the record at the time of the operation
    pub total: Amount,

    /// Record note, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Full record as JSON
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<serde_json::Value>,
}

impl AuditEntry {
    fn for_record(operation: Operation, record: &LedgerRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            record_id: record.id.to_string(),
            owner: record.owner_id.to_string(),
            total: record.total(),
            note: record.note.clone(),
            snapshot: snapshot_of(record, &record.id.to_string()),
        }
    }

    /// Entry for a newly created record
    pub fn create(record: &LedgerRecord) -> Self {
        Self::for_record(Operation::Create, record)
    }

    /// Entry for a deleted record; the snapshot keeps what was removed
    pub fn delete(record: &LedgerRecord) -> Self {
        Self::for_record(Operation::Delete, record)
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} by {} total {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.record_id,
            self.owner,
            self.total
        );

        if let Some(note) = &self.note {
            output.push_str(&format!(" ({})", note));
        }

        output
    }
}

/// Serialize a value for the audit snapshot; a failure drops the snapshot,
/// not the entry
fn snapshot_of<T: Serialize>(value: &T, record_id: &str) -> Option<serde_json::Value> {
    match serde_json::to_value(value) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, record = record_id, "Failed to snapshot record for audit");
            None
        }
    }
}
