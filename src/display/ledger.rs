//! Ledger table formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::ledger::Ledger;
use crate::models::DenominationEntry;

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "Denomination")]
    denomination: String,
    #[tabled(rename = "Bundle")]
    bundle: String,
    #[tabled(rename = "Open")]
    open: String,
    #[tabled(rename = "Count")]
    count: i64,
    #[tabled(rename = "Total")]
    total: String,
}

impl LedgerRow {
    fn from_entry(entry: &DenominationEntry, symbol: &str) -> Self {
        Self {
            denomination: format!("{}{}", symbol, entry.denomination()),
            bundle: entry.bundle().text().to_string(),
            open: entry.open().text().to_string(),
            count: entry.count(),
            total: entry.total().format_with_symbol(symbol),
        }
    }
}

/// Format every row of a ledger followed by the grand total
///
/// Rows with unparseable text are flagged so the user can correct them.
pub fn format_ledger(ledger: &Ledger, symbol: &str) -> String {
    let rows: Vec<_> = ledger
        .entries()
        .iter()
        .map(|e| LedgerRow::from_entry(e, symbol))
        .collect();

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push('\n');

    for entry in ledger.entries() {
        if !entry.bundle().is_valid() || !entry.open().is_valid() {
            output.push_str(&format!(
                "! {}{} has a count that is not a number\n",
                symbol,
                entry.denomination()
            ));
        }
    }

    output.push_str(&format!(
        "Grand Total: {}\n",
        ledger.total_amount().format_with_symbol(symbol)
    ));
    output
}
