//! Civil timestamps in India Standard Time
//!
//! Records carry their creation time as text in the form
//! `DD/MM/YYYY HH:MM:SS`, always rendered at UTC+05:30 no matter where the
//! process runs. Older records may instead hold an RFC 3339 instant.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// UTC+05:30 in seconds
pub const CIVIL_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Layout of the civil timestamp text
pub const CIVIL_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// The fixed civil timezone all timestamps are rendered and grouped in
pub fn civil_offset() -> FixedOffset {
    FixedOffset::east_opt(CIVIL_OFFSET_SECS).expect("UTC+05:30 is a valid offset")
}

/// Render an instant as civil timestamp text
pub fn format_civil(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&civil_offset())
        .format(CIVIL_FORMAT)
        .to_string()
}

/// The current time as civil timestamp text
pub fn civil_now() -> String {
    format_civil(Utc::now())
}

/// Outcome of reading a stored timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedTimestamp {
    /// A point in time, expressed in the civil timezone
    Parsed(DateTime<FixedOffset>),
    /// The text matched none of the accepted shapes
    Unparsable,
}

impl ParsedTimestamp {
    /// Wrap an instant recorded by the store
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        ParsedTimestamp::Parsed(instant.with_timezone(&civil_offset()))
    }

    pub fn instant(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            ParsedTimestamp::Parsed(dt) => Some(*dt),
            ParsedTimestamp::Unparsable => None,
        }
    }

    /// Calendar date in the civil timezone
    pub fn civil_date(&self) -> Option<NaiveDate> {
        self.instant().map(|dt| dt.date_naive())
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ParsedTimestamp::Parsed(_))
    }
}

/// Parse a stored timestamp
///
/// Text containing `T` or `Z` is read as an ISO instant (RFC 3339, or a
/// bare `YYYY-MM-DDTHH:MM[:SS]` taken as civil time). Everything else must be
/// `DD/MM/YYYY HH:MM:SS` in civil time.
pub fn parse_timestamp(text: &str) -> ParsedTimestamp {
    let text = text.trim();
    let offset = civil_offset();

    let parsed = if text.contains('T') || text.contains('Z') {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&offset))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                    .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
                    .ok()
                    .and_then(|naive| offset.from_local_datetime(&naive).single())
            })
    } else {
        NaiveDateTime::parse_from_str(text, CIVIL_FORMAT)
            .ok()
            .and_then(|naive| offset.from_local_datetime(&naive).single())
    };

    match parsed {
        Some(dt) => ParsedTimestamp::Parsed(dt),
        None => ParsedTimestamp::Unparsable,
    }
}
