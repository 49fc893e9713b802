//! Denomination lines and their raw count inputs
//!
//! A denomination line holds two user-typed counts: whole bundles of 100
//! notes and loose ("open") notes. The typed text is kept next to its parsed
//! value so a half-typed entry such as `-` or `12a` stays on screen while the
//! totals keep working.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;

/// Number of notes in one bundle
pub const BUNDLE_SIZE: i64 = 100;

/// Face values offered by default, largest first
pub const DEFAULT_DENOMINATIONS: [u32; 10] = [2000, 500, 200, 100, 50, 20, 10, 5, 2, 1];

/// Which of the two counts on a line is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountField {
    /// Bundles of [`BUNDLE_SIZE`] notes
    Bundle,
    /// Loose notes
    Open,
}

impl fmt::Display for CountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountField::Bundle => write!(f, "bundle"),
            CountField::Open => write!(f, "open"),
        }
    }
}

/// Typed text plus its parsed integer value
///
/// `value` is `None` when the text is not a valid count. Blank text and a
/// lone `-` are valid and mean zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountInput {
    text: String,
    value: Option<i64>,
}

impl CountInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let value = parse_count(&text);
        Self { text, value }
    }

    /// Build an input from an already-known number
    pub fn from_value(value: i64) -> Self {
        Self {
            text: value.to_string(),
            value: Some(value),
        }
    }

    /// The text as typed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The parsed count, `None` if the text is not a number
    pub fn value(&self) -> Option<i64> {
        self.value
    }

    /// The count used for live totals; invalid text counts as zero
    pub fn value_or_zero(&self) -> i64 {
        self.value.unwrap_or(0)
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }
}

/// Parse an optionally negative run of ASCII digits
///
/// Returns `Some(0)` for `""` and `"-"`. Any other shape (leading `+`,
/// whitespace, decimals, repeated signs) or an `i64` overflow is `None`.
pub fn parse_count(text: &str) -> Option<i64> {
    if text.is_empty() || text == "-" {
        return Some(0);
    }

    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    text.parse::<i64>().ok()
}

/// One denomination row while counting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenominationEntry {
    denomination: u32,
    bundle: CountInput,
    open: CountInput,
    count: i64,
    total: Amount,
}

impl DenominationEntry {
    /// Create a blank row for a face value
    pub fn new(denomination: u32) -> Self {
        Self {
            denomination,
            bundle: CountInput::default(),
            open: CountInput::default(),
            count: 0,
            total: Amount::zero(),
        }
    }

    /// Create a row with both counts already typed
    pub fn with_counts(denomination: u32, bundle: CountInput, open: CountInput) -> Self {
        let mut entry = Self {
            denomination,
            bundle,
            open,
            count: 0,
            total: Amount::zero(),
        };
        entry.recompute();
        entry
    }

    pub fn denomination(&self) -> u32 {
        self.denomination
    }

    pub fn bundle(&self) -> &CountInput {
        &self.bundle
    }

    pub fn open(&self) -> &CountInput {
        &self.open
    }

    /// Total number of notes: `bundle * 100 + open`
    pub fn count(&self) -> i64 {
        self.count
    }

    /// Face value times count
    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn input(&self, field: CountField) -> &CountInput {
        match field {
            CountField::Bundle => &self.bundle,
            CountField::Open => &self.open,
        }
    }

    /// Replace the text of one field and refresh the derived values
    pub fn set_field(&mut self, field: CountField, text: impl Into<String>) {
        let input = CountInput::new(text);
        match field {
            CountField::Bundle => self.bundle = input,
            CountField::Open => self.open = input,
        }
        self.recompute();
    }

    // Saturating so a huge half-typed value never panics; validation rejects it.
    fn recompute(&mut self) {
        self.count = self
            .bundle
            .value_or_zero()
            .saturating_mul(BUNDLE_SIZE)
            .saturating_add(self.open.value_or_zero());
        self.total = Amount::new(self.count.saturating_mul(i64::from(self.denomination)));
    }
}
