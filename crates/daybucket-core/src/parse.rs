//! Input parsing for timeline timestamps.
//!
//! Timeline exports carry ISO-8601 strings in a handful of shapes:
//! - `2023-01-01T23:30:00Z`, `2023-01-01T23:30:00.000Z` or `2023-01-01T23:30Z`
//! - `2023-01-01T15:30:00-08:00` (offset with or without a colon)
//! - `2023-01-01T23:30:00` (no offset, interpreted as UTC)
//! - `2023-01-01` (a bare date, midnight UTC)

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{DayBucketError, Result};

/// Layouts carrying an explicit offset that RFC 3339 parsing rejects
/// (space separator, missing seconds, `+0000` style offsets).
const OFFSET_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

/// Layouts without an offset.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp into a UTC instant.
///
/// Timestamps with an offset (including the `Z` designator) are normalized
/// to UTC. Timestamps without an offset are taken to already be UTC, never
/// local time.
///
/// # Arguments
///
/// * `input` - The timestamp string to parse
///
/// # Returns
///
/// The parsed UTC datetime on success, or [`DayBucketError::ParseError`].
///
/// # Examples
///
/// ```
/// use daybucket_core::parse::parse_instant;
/// use chrono::{TimeZone, Utc};
///
/// let zulu = parse_instant("2023-01-01T23:30:00Z").unwrap();
/// let offset = parse_instant("2023-01-01T15:30:00-08:00").unwrap();
/// let naive = parse_instant("2023-01-01T23:30:00").unwrap();
///
/// let expected = Utc.with_ymd_and_hms(2023, 1, 1, 23, 30, 0).unwrap();
/// assert_eq!(zulu, expected);
/// assert_eq!(offset, expected);
/// assert_eq!(naive, expected);
/// ```
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(DayBucketError::ParseError("Empty timestamp".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    // `%z` has no Zulu form, so spell the designator as an offset.
    let with_offset = match trimmed.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{}+0000", rest),
        None => trimmed.to_string(),
    };
    for layout in OFFSET_LAYOUTS {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, layout) {
            return Ok(dt.with_timezone(&Utc));
        }
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(DayBucketError::ParseError(format!(
        "Invalid ISO-8601 timestamp: '{}'",
        input
    )))
}
