//! Configuration module for Cash Ledger
//!
//! - Base directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
