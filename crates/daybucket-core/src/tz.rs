//! Timezone handling utilities.
//!
//! This module provides functions for parsing timezone names and mapping
//! UTC instants onto local calendar dates with proper DST handling.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{DayBucketError, Result};

/// Timezone used for date bucketing when the caller does not pick one.
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

/// Parse an IANA timezone name into a [`chrono_tz::Tz`].
///
/// # Arguments
///
/// * `name` - The IANA timezone name (e.g., "America/Los_Angeles", "Europe/Berlin")
///
/// # Returns
///
/// The parsed timezone on success, or [`DayBucketError::InvalidTimezone`].
///
/// # Examples
///
/// ```
/// use daybucket_core::tz::parse_tz;
///
/// let tz = parse_tz("America/Los_Angeles").unwrap();
/// assert_eq!(tz.to_string(), "America/Los_Angeles");
/// assert!(parse_tz("Mars/Olympus_Mons").is_err());
/// ```
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| DayBucketError::InvalidTimezone(name.to_string()))
}

/// Convert a UTC datetime to local time in the specified timezone.
///
/// The offset applied is the one in effect at that instant, so the same
/// zone yields -08:00 in January and -07:00 in July for Pacific time.
pub fn utc_to_local(utc: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    utc.with_timezone(&tz)
}

/// The local calendar date on which a UTC instant falls in `tz`.
pub fn local_date(utc: DateTime<Utc>, tz: Tz) -> NaiveDate {
    utc_to_local(utc, tz).date_naive()
}

/// Format a datetime as RFC3339 with timezone offset.
///
/// # Returns
///
/// An RFC3339 formatted string (e.g., "2023-01-01T15:30:00-08:00").
pub fn format_rfc3339<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Format a UTC datetime as RFC3339 with Z suffix.
///
/// # Returns
///
/// An RFC3339 formatted string with Z suffix (e.g., "2023-01-01T00:00:00Z").
pub fn format_rfc3339_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
