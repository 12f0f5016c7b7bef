//! Parsing of Todoist due dates.
//!
//! Dates carrying an explicit `Z` are taken verbatim. Floating dates and
//! date-times are read in UTC-5, the zone the sync has always assumed for
//! Todoist's floating values.

use super::DueDateError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

const FLOATING_OFFSET_SECS: i32 = 5 * 3600;

/// Parses a raw Todoist due date into a UTC instant.
///
/// # Errors
///
/// Returns [`DueDateError`] when the value is neither an RFC 3339 timestamp
/// ending in `Z`, a `YYYY-MM-DD` date, nor a `YYYY-MM-DDTHH:MM:SS` date-time.
pub fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, DueDateError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('Z') {
        return DateTime::parse_from_rfc3339(trimmed)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|_| DueDateError(raw.to_owned()));
    }

    let naive = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_err(|_| DueDateError(raw.to_owned()))?;

    let offset = FixedOffset::west_opt(FLOATING_OFFSET_SECS)
        .ok_or_else(|| DueDateError(raw.to_owned()))?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| DueDateError(raw.to_owned()))
}
