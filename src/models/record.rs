//! Persisted ledger records
//!
//! A record is one saved count: the non-zero denomination lines, an optional
//! note, and when it was taken. Records never change after creation; they
//! can only be deleted by their owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::ids::{OwnerId, RecordId};
use super::timestamp::{parse_timestamp, ParsedTimestamp};

/// One saved denomination line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub denomination: u32,
    pub count: i64,
    #[serde(default)]
    pub bundle_count: i64,
    #[serde(default)]
    pub open_count: i64,
    pub total: Amount,
}

impl LineItem {
    /// Build a line, deriving the total from face value and count
    pub fn new(denomination: u32, count: i64, bundle_count: i64, open_count: i64) -> Self {
        Self {
            denomination,
            count,
            bundle_count,
            open_count,
            total: Amount::new(count.saturating_mul(i64::from(denomination))),
        }
    }

    /// Same line with `total` recomputed from `denomination * count`
    pub fn normalized(&self) -> Self {
        Self::new(
            self.denomination,
            self.count,
            self.bundle_count,
            self.open_count,
        )
    }
}

/// A creation request handed to the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLedgerRecord {
    pub note: Option<String>,
    /// Civil timestamp text captured at submission
    pub timestamp: Option<String>,
    pub lines: Vec<LineItem>,
}

/// A stored ledger record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub id: RecordId,
    pub owner_id: OwnerId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Civil timestamp text, `DD/MM/YYYY HH:MM:SS`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// When the store accepted the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub lines: Vec<LineItem>,
}

impl LedgerRecord {
    /// Materialize a creation request
    pub fn from_new(
        id: RecordId,
        owner_id: OwnerId,
        created_at: DateTime<Utc>,
        new: NewLedgerRecord,
    ) -> Self {
        Self {
            id,
            owner_id,
            note: new
                .note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            timestamp: new.timestamp,
            created_at: Some(created_at),
            lines: new.lines.iter().map(LineItem::normalized).collect(),
        }
    }

    /// Sum of all line totals
    pub fn total(&self) -> Amount {
        self.lines.iter().map(|l| l.total).sum()
    }

    /// The moment this record was taken
    ///
    /// Uses the civil timestamp when present and readable, otherwise the
    /// store's creation instant.
    pub fn parsed_timestamp(&self) -> ParsedTimestamp {
        if let Some(text) = &self.timestamp {
            if let parsed @ ParsedTimestamp::Parsed(_) = parse_timestamp(text) {
                return parsed;
            }
        }
        match self.created_at {
            Some(instant) => ParsedTimestamp::from_utc(instant),
            None => ParsedTimestamp::Unparsable,
        }
    }

    /// Lines sorted largest denomination first
    pub fn lines_by_denomination(&self) -> Vec<&LineItem> {
        let mut lines: Vec<_> = self.lines.iter().collect();
        lines.sort_by(|a, b| b.denomination.cmp(&a.denomination));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn record(timestamp: Option<&str>, created_at: Option<DateTime<Utc>>) -> LedgerRecord {
        LedgerRecord {
            id: RecordId::new(),
            owner_id: OwnerId::new("asha"),
            note: None,
            timestamp: timestamp.map(String::from),
            created_at,
            lines: vec![LineItem::new(100, 105, 1, 5), LineItem::new(500, -100, -1, 0)],
        }
    }

    #[test]
    fn test_total() {
        let r = record(None, None);
        assert_eq!(r.total(), Amount::new(-39_500));
    }

    #[test]
    fn test_parsed_timestamp_prefers_civil_text() {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let r = record(Some("02/06/2025 09:00:00"), Some(created));
        assert_eq!(
            r.parsed_timestamp().civil_date(),
            NaiveDate::from_ymd_opt(2025, 6, 2)
        );
    }

    #[test]
    fn test_parsed_timestamp_falls_back_to_created_at() {
        let created = Utc.with_ymd_and_hms(2025, 3, 4, 19, 0, 0).unwrap();
        let r = record(Some("garbage"), Some(created));
        assert_eq!(
            r.parsed_timestamp().civil_date(),
            NaiveDate::from_ymd_opt(2025, 3, 5)
        );

        let r = record(None, None);
        assert_eq!(r.parsed_timestamp(), ParsedTimestamp::Unparsable);
    }

    #[test]
    fn test_from_new_normalizes() {
        let mut line = LineItem::new(200, 3, 0, 3);
        line.total = Amount::new(1);
        let new = NewLedgerRecord {
            note: Some("   ".into()),
            timestamp: Some("01/06/2025 10:00:00".into()),
            lines: vec![line],
        };
        let r = LedgerRecord::from_new(RecordId::new(), OwnerId::new("asha"), Utc::now(), new);
        assert_eq!(r.note, None);
        assert_eq!(r.lines[0].total, Amount::new(600));
        assert!(r.created_at.is_some());
    }

    #[test]
    fn test_lines_by_denomination() {
        let r = record(None, None);
        let order: Vec<u32> = r.lines_by_denomination().iter().map(|l| l.denomination).collect();
        assert_eq!(order, vec![500, 100]);
    }
}
