//! Denomination ledger
//!
//! Holds one row per face value while a count is being entered, keeps the
//! per-row count and total current as text is typed, and turns the rows into
//! validated lines ready to be saved.

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Amount, CountField, CountInput, DenominationEntry, LineItem, BUNDLE_SIZE,
    DEFAULT_DENOMINATIONS,
};

/// A validated, non-zero denomination line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLine {
    pub denomination: u32,
    pub count: i64,
    pub bundle_count: i64,
    pub open_count: i64,
}

impl ParsedLine {
    pub fn total(&self) -> Amount {
        Amount::new(self.count.saturating_mul(i64::from(self.denomination)))
    }
}

impl From<ParsedLine> for LineItem {
    fn from(line: ParsedLine) -> Self {
        LineItem::new(
            line.denomination,
            line.count,
            line.bundle_count,
            line.open_count,
        )
    }
}

/// The rows of one count in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<DenominationEntry>,
}

impl Ledger {
    /// Create a blank ledger with one row per face value, in the given order
    pub fn new(denominations: &[u32]) -> Self {
        Self {
            entries: denominations
                .iter()
                .map(|&d| DenominationEntry::new(d))
                .collect(),
        }
    }

    /// Rebuild a ledger from saved bundle/open counts
    ///
    /// Face values without a line stay blank.
    pub fn from_lines<I>(denominations: &[u32], lines: I) -> Self
    where
        I: IntoIterator<Item = (u32, i64, i64)>,
    {
        let mut ledger = Self::new(denominations);
        for (denomination, bundle, open) in lines {
            let entry = DenominationEntry::with_counts(
                denomination,
                CountInput::from_value(bundle),
                CountInput::from_value(open),
            );
            match ledger.position(denomination) {
                Some(index) => ledger.entries[index] = entry,
                None => ledger.entries.push(entry),
            }
        }
        ledger
    }

    pub fn entries(&self) -> &[DenominationEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&DenominationEntry> {
        self.entries.get(index)
    }

    /// Index of the row for a face value
    pub fn position(&self, denomination: u32) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.denomination() == denomination)
    }

    /// Replace the text of one field and refresh that row's count and total
    ///
    /// Text that is not a number is kept for display and counts as zero
    /// until it is corrected.
    pub fn update_field(
        &mut self,
        index: usize,
        field: CountField,
        raw_text: impl Into<String>,
    ) -> LedgerResult<&DenominationEntry> {
        let len = self.entries.len();
        let entry = self.entries.get_mut(index).ok_or_else(|| {
            LedgerError::Validation(format!(
                "Row {} is out of range (ledger has {} rows)",
                index, len
            ))
        })?;
        entry.set_field(field, raw_text);
        Ok(entry)
    }

    /// Update a row by face value instead of position
    pub fn update_denomination(
        &mut self,
        denomination: u32,
        field: CountField,
        raw_text: impl Into<String>,
    ) -> LedgerResult<&DenominationEntry> {
        let index = self.position(denomination).ok_or_else(|| {
            LedgerError::Validation(format!("₹{} is not a known denomination", denomination))
        })?;
        self.update_field(index, field, raw_text)
    }

    /// Grand total across all rows; may be negative
    pub fn total_amount(&self) -> Amount {
        self.entries.iter().map(DenominationEntry::total).sum()
    }

    /// Whether the grand total is zero; such a count is not offered for saving
    pub fn is_zero_total(&self) -> bool {
        self.total_amount().is_zero()
    }

    /// Validate every row and collect the non-zero ones
    ///
    /// Returns an empty list when all rows are blank or zero; callers must
    /// treat that as nothing to submit.
    pub fn validate_and_parse(&self) -> LedgerResult<Vec<ParsedLine>> {
        let mut lines = Vec::new();

        for entry in &self.entries {
            let bundle_count = checked_value(entry, CountField::Bundle)?;
            let open_count = checked_value(entry, CountField::Open)?;

            let bundle_units = bundle_count
                .checked_mul(BUNDLE_SIZE)
                .ok_or_else(|| invalid(entry, CountField::Bundle))?;
            let count = bundle_units
                .checked_add(open_count)
                .ok_or_else(|| invalid(entry, CountField::Open))?;
            if count.checked_mul(i64::from(entry.denomination())).is_none() {
                // Blame the field carrying most of the count
                let field = if open_count.unsigned_abs() >= bundle_units.unsigned_abs() {
                    CountField::Open
                } else {
                    CountField::Bundle
                };
                return Err(invalid(entry, field));
            }

            if count == 0 {
                continue;
            }

            lines.push(ParsedLine {
                denomination: entry.denomination(),
                count,
                bundle_count,
                open_count,
            });
        }

        debug!(lines = lines.len(), "Validated ledger");
        Ok(lines)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(&DEFAULT_DENOMINATIONS)
    }
}

fn checked_value(entry: &DenominationEntry, field: CountField) -> LedgerResult<i64> {
    entry
        .input(field)
        .value()
        .ok_or_else(|| invalid(entry, field))
}

fn invalid(entry: &DenominationEntry, field: CountField) -> LedgerError {
    LedgerError::InvalidInput {
        denomination: entry.denomination(),
        field,
        text: entry.input(field).text().to_string(),
    }
}
