//! History CLI commands
//!
//! Browse saved records one at a time, list the days that have records, and
//! delete records.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_dates, format_timeline_entry};
use crate::error::{LedgerError, LedgerResult};
use crate::models::Session;
use crate::services::LedgerService;
use crate::storage::Storage;
use crate::timeline::{Direction, TimelineView};

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Show one saved record (newest by default)
    Show {
        /// Position in the history, 0 = newest
        #[arg(short, long, conflicts_with = "date")]
        index: Option<usize>,
        /// Jump to the first record on a day (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(short, long)]
        date: Option<String>,
        /// Step one record older from the chosen position
        #[arg(long, conflicts_with = "newer")]
        older: bool,
        /// Step one record newer from the chosen position
        #[arg(long)]
        newer: bool,
    },
    /// List the days that have saved records
    Dates,
    /// Delete a saved record
    Delete {
        /// Record ID (rec-xxxxxxxx or full UUID)
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse a calendar day typed on the command line
pub fn parse_date(text: &str) -> LedgerResult<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .map_err(|_| {
            LedgerError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or DD/MM/YYYY",
                text
            ))
        })
}

/// Position the cursor as requested, then take the optional step; returns a
/// notice when a date has no records
pub fn position_view(
    view: &mut TimelineView,
    index: Option<usize>,
    date: Option<NaiveDate>,
    step: Option<Direction>,
) -> Option<String> {
    if let Some(index) = index {
        view.seek(index);
    }
    let notice = match date {
        Some(date) if !view.is_date_available(date) => Some(format!(
            "No calculations on {}.",
            date.format("%d/%m/%Y")
        )),
        Some(date) => {
            view.jump_to_date(date);
            None
        }
        None => None,
    };
    if let Some(direction) = step {
        view.navigate(direction);
    }
    notice
}

fn print_current(view: &TimelineView, settings: &Settings) {
    let Some(entry) = view.current() else {
        println!("No calculations found.");
        return;
    };

    print!(
        "{}",
        format_timeline_entry(entry, view.cursor(), view.len(), &settings.currency_symbol)
    );
    let mut hints = Vec::new();
    if !view.is_oldest() {
        hints.push(format!("older: --index {}", view.cursor() + 1));
    }
    if !view.is_newest() {
        hints.push(format!("newer: --index {}", view.cursor() - 1));
    }
    if !hints.is_empty() {
        println!("({})", hints.join(", "));
    }
}

/// Handle a history command
pub fn handle_history_command(
    storage: &Storage,
    settings: &Settings,
    session: &Session,
    cmd: HistoryCommands,
) -> LedgerResult<()> {
    let service = LedgerService::from_storage(storage);

    match cmd {
        HistoryCommands::Show {
            index,
            date,
            older,
            newer,
        } => {
            let date = date.as_deref().map(parse_date).transpose()?;
            let step = match (older, newer) {
                (true, _) => Some(Direction::Older),
                (_, true) => Some(Direction::Newer),
                _ => None,
            };
            let mut view = service.timeline(session)?;

            if let Some(notice) = position_view(&mut view, index, date, step) {
                println!("{}", notice);
            }
            print_current(&view, settings);
        }

        HistoryCommands::Dates => {
            let view = service.timeline(session)?;
            print!("{}", format_dates(view.dates()));
        }

        HistoryCommands::Delete { id, force } => {
            let record = storage
                .records
                .find(session, &id)?
                .ok_or_else(|| LedgerError::record_not_found(&id))?;

            let mut view = service.timeline(session)?;
            if let Some(index) = view.entries().iter().position(|e| e.record.id == record.id) {
                view.seek(index);
            }

            if !force {
                print_current(&view, settings);
                println!();
                println!("WARNING: This will permanently delete {}.", record.id);
                println!("To proceed, run again with --force flag:");
                println!("  cashledger history delete {} --force", id);
                return Ok(());
            }

            let removed = service.delete(session, record.id)?;
            view.remove(removed.id);
            println!(
                "Deleted {} ({})",
                removed.id,
                removed.total().format_with_symbol(&settings.currency_symbol)
            );
            println!();
            print_current(&view, settings);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LedgerRecord, LineItem, OwnerId, RecordId};

    fn view() -> TimelineView {
        let record = |ts: &str| LedgerRecord {
            id: RecordId::new(),
            owner_id: OwnerId::new("asha"),
            note: None,
            timestamp: Some(ts.to_string()),
            created_at: None,
            lines: vec![LineItem::new(10, 1, 0, 1)],
        };
        TimelineView::build(vec![
            record("01/06/2025 10:00:00"),
            record("02/06/2025 10:00:00"),
            record("03/06/2025 10:00:00"),
        ])
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(parse_date("2025-06-02").unwrap(), expected);
        assert_eq!(parse_date("02/06/2025").unwrap(), expected);
        assert!(parse_date("June 2").is_err());
    }

    #[test]
    fn test_position_view() {
        let mut v = view();
        assert!(position_view(&mut v, Some(10), None, None).is_none());
        assert_eq!(v.cursor(), 2);

        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert!(position_view(&mut v, None, Some(date), None).is_none());
        assert_eq!(v.cursor(), 1);

        let missing = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        let notice = position_view(&mut v, None, Some(missing), None).unwrap();
        assert_eq!(notice, "No calculations on 02/05/2025.");
        assert_eq!(v.cursor(), 1);
    }

    #[test]
    fn test_position_view_steps() {
        let mut v = view();
        assert!(position_view(&mut v, None, None, Some(Direction::Older)).is_none());
        assert_eq!(v.cursor(), 1);

        position_view(&mut v, Some(0), None, Some(Direction::Newer));
        assert_eq!(v.cursor(), 0);

        position_view(&mut v, Some(2), None, Some(Direction::Older));
        assert_eq!(v.cursor(), 2);

        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        position_view(&mut v, None, Some(date), Some(Direction::Newer));
        assert_eq!(v.cursor(), 0);
    }
}
