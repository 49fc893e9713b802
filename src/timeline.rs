//! Entry timeline
//!
//! Orders saved records newest first, lists the calendar days that have
//! records, and keeps a cursor for stepping through them one record at a
//! time or jumping straight to a day.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::warn;

use crate::models::{LedgerRecord, ParsedTimestamp, RecordId};

/// Direction to move the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the end of the list (older records)
    Older,
    /// Toward index 0 (newer records)
    Newer,
}

/// A record together with its parsed timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub record: LedgerRecord,
    pub timestamp: ParsedTimestamp,
}

impl TimelineEntry {
    /// Calendar day in the civil timezone, if the timestamp was readable
    pub fn civil_date(&self) -> Option<NaiveDate> {
        self.timestamp.civil_date()
    }
}

/// Navigable, newest-first view over a set of records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineView {
    entries: Vec<TimelineEntry>,
    dates: Vec<NaiveDate>,
    cursor: usize,
}

impl TimelineView {
    /// Build a view from records in the order the store returned them
    ///
    /// Records with equal instants keep that order. Records without a
    /// readable timestamp go last and contribute no date.
    pub fn build(records: Vec<LedgerRecord>) -> Self {
        let mut entries: Vec<TimelineEntry> = records
            .into_iter()
            .map(|record| {
                let timestamp = record.parsed_timestamp();
                if !timestamp.is_parsed() {
                    warn!(
                        record = %record.id,
                        timestamp = ?record.timestamp,
                        "Record has no readable timestamp"
                    );
                }
                TimelineEntry { record, timestamp }
            })
            .collect();

        // `None` sorts below any `Some`, so reversing the comparison puts
        // unreadable records last. `sort_by` is stable.
        entries.sort_by(|a, b| b.timestamp.instant().cmp(&a.timestamp.instant()));

        let dates: BTreeSet<NaiveDate> = entries.iter().filter_map(|e| e.civil_date()).collect();

        Self {
            entries,
            dates: dates.into_iter().rev().collect(),
            cursor: 0,
        }
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Days with at least one record, newest first
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry under the cursor
    pub fn current(&self) -> Option<&TimelineEntry> {
        self.entries.get(self.cursor)
    }

    pub fn is_oldest(&self) -> bool {
        self.cursor + 1 >= self.entries.len()
    }

    pub fn is_newest(&self) -> bool {
        self.cursor == 0
    }

    /// Move one record older or newer; stays put at either end
    pub fn navigate(&mut self, direction: Direction) -> usize {
        match direction {
            Direction::Older if !self.is_oldest() => self.cursor += 1,
            Direction::Newer if !self.is_newest() => self.cursor -= 1,
            _ => {}
        }
        self.cursor
    }

    /// Move to an index, clamped to the list
    pub fn seek(&mut self, index: usize) -> usize {
        self.cursor = index.min(self.entries.len().saturating_sub(1));
        self.cursor
    }

    /// Move to the first record on a calendar day; unchanged if there is none
    pub fn jump_to_date(&mut self, date: NaiveDate) -> usize {
        if let Some(index) = self.entries.iter().position(|e| e.civil_date() == Some(date)) {
            self.cursor = index;
        }
        self.cursor
    }

    pub fn is_date_available(&self, date: NaiveDate) -> bool {
        self.dates.binary_search_by(|d| date.cmp(d)).is_ok()
    }

    /// Drop a deleted record, keeping the cursor inside the list
    pub fn remove(&mut self, id: RecordId) -> Option<LedgerRecord> {
        let index = self.entries.iter().position(|e| e.record.id == id)?;
        let removed = self.entries.remove(index);

        if let Some(date) = removed.civil_date() {
            if !self.entries.iter().any(|e| e.civil_date() == Some(date)) {
                self.dates.retain(|d| *d != date);
            }
        }
        if index < self.cursor {
            self.cursor -= 1;
        }
        self.seek(self.cursor);

        Some(removed.record)
    }
}
