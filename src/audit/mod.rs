//! Audit logging for Cash Ledger
//!
//! Every record creation and deletion is appended to `audit.log` as one
//! JSON line holding the operation, the record's owner and total, and a full
//! snapshot of the record.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
