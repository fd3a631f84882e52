//! Timestamp helpers for the rate document's `updated` field.

use chrono::{DateTime, NaiveDateTime, Utc};

/// A timestamp with timezone (always UTC for Rupantar).
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Datetime layouts accepted from upstream rate documents, beyond RFC 3339.
/// Bare layouts are taken as UTC.
const UPDATED_LAYOUTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S"];

/// Parse an `updated` value leniently.
///
/// RFC 3339 with any offset is tried first and normalized to UTC; the
/// common space-separated layouts follow. Returns `None` when nothing
/// matches.
pub fn parse_updated_at(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    UPDATED_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .map(|naive| naive.and_utc())
}

/// Render a timestamp for the "last updated" line.
pub fn format_updated_at(ts: Timestamp) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}
