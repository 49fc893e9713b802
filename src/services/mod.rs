//! Service layer for Cash Ledger
//!
//! The service layer ties the ledger, the record store and the audit log
//! together.

pub mod ledger;

pub use ledger::LedgerService;
