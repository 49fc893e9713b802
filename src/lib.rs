//! Cash Ledger - currency denomination counting with a dated history
//!
//! Count notes per denomination as bundles of 100 plus loose notes, save the
//! count as a record, and browse saved records newest first or by day.
//!
//! # Architecture
//!
//! - `ledger`: rows being counted, live totals, and validation
//! - `timeline`: newest-first ordering, available dates, cursor navigation
//! - `models`: records, denomination rows, IDs, amounts, civil timestamps
//! - `storage`: the `RecordStore` contract and its JSON file implementation
//! - `services`: submission, history loading, and deletion with auditing
//! - `audit`: append-only log of record creations and deletions
//! - `config`: paths and user settings
//! - `display` / `cli`: terminal output and command handlers
//!
//! # Example
//!
//! ```
//! use cash_ledger::ledger::Ledger;
//! use cash_ledger::models::{Amount, CountField};
//!
//! let mut ledger = Ledger::new(&[500, 100]);
//! ledger.update_field(0, CountField::Bundle, "-1").unwrap();
//! ledger.update_field(1, CountField::Bundle, "1").unwrap();
//! ledger.update_field(1, CountField::Open, "5").unwrap();
//! assert_eq!(ledger.total_amount(), Amount::new(-39_500));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;
pub mod services;
pub mod storage;
pub mod timeline;

pub use error::{LedgerError, LedgerResult};
