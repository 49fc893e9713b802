//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod count;
pub mod history;

pub use audit::handle_audit_command;
pub use count::{handle_count_command, CountArgs};
pub use history::{handle_history_command, HistoryCommands};
