//! Record and history formatting

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::timeline::TimelineEntry;

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Denomination")]
    denomination: String,
    #[tabled(rename = "Count")]
    count: i64,
    #[tabled(rename = "Total")]
    total: String,
}

/// Format one timeline entry with its position in the history
pub fn format_timeline_entry(
    entry: &TimelineEntry,
    position: usize,
    len: usize,
    symbol: &str,
) -> String {
    let record = &entry.record;
    let mut output = String::new();

    let when = match entry.timestamp.instant() {
        Some(dt) => dt.format("%d/%m/%Y %I:%M %p").to_string(),
        None => "Invalid Date".to_string(),
    };

    output.push_str(&format!("Record {} of {}\n", position + 1, len));
    output.push_str(&format!("ID:    {}\n", record.id));
    output.push_str(&format!("Date:  {}\n", when));
    if let Some(note) = &record.note {
        output.push_str(&format!("Note:  {}\n", note));
    }

    let rows: Vec<_> = record
        .lines_by_denomination()
        .into_iter()
        .map(|line| LineRow {
            denomination: format!("{}{}", symbol, line.denomination),
            count: line.count,
            total: line.total.format_with_symbol(symbol),
        })
        .collect();
    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output.push('\n');

    output.push_str(&format!(
        "Total: {}\n",
        record.total().format_with_symbol(symbol)
    ));
    output
}

/// Format the days that have records, newest first
pub fn format_dates(dates: &[NaiveDate]) -> String {
    if dates.is_empty() {
        return "No calculations found.\n".to_string();
    }

    let mut output = String::new();
    for date in dates {
        output.push_str(&date.format("%d/%m/%Y (%a)").to_string());
        output.push('\n');
    }
    output
}
