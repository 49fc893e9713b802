//! Core data models for Cash Ledger
//!
//! This module contains the data structures of the counting domain:
//! denomination rows, saved records, identifiers, amounts and the civil
//! timestamps records are dated with.

pub mod amount;
pub mod denomination;
pub mod ids;
pub mod record;
pub mod session;
pub mod timestamp;

pub use amount::Amount;
pub use denomination::{
    parse_count, CountField, CountInput, DenominationEntry, BUNDLE_SIZE, DEFAULT_DENOMINATIONS,
};
pub use ids::{OwnerId, RecordId};
pub use record::{LedgerRecord, LineItem, NewLedgerRecord};
pub use session::Session;
pub use timestamp::{civil_now, civil_offset, format_civil, parse_timestamp, ParsedTimestamp};
