//! Display formatting for terminal output
//!
//! Renders ledgers, records and date lists as text tables.

pub mod ledger;
pub mod record;

pub use ledger::format_ledger;
pub use record::{format_dates, format_timeline_entry};
