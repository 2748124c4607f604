//! Cutoff filtering of timeline documents.
//!
//! A cutoff filter drops every segment that ended (or started, depending on
//! the [`CutoffMode`]) before a given instant. Only the segment sequence is
//! rewritten; every other field of the document is left as it was.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DayBucketError, Result};
use crate::models::{CutoffMode, FilterResult, SEGMENTS_KEY};
use crate::parse::parse_instant;
use crate::segment::Segment;

/// Jan 1 00:00:00 UTC of `year`.
///
/// # Examples
///
/// ```
/// use daybucket_core::filter::cutoff_for_year;
///
/// let cutoff = cutoff_for_year(2023).unwrap();
/// assert_eq!(cutoff.to_rfc3339(), "2023-01-01T00:00:00+00:00");
/// ```
pub fn cutoff_for_year(year: i32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| DayBucketError::InvalidArgument(format!("Year out of range: {}", year)))
}

/// Decide whether a segment survives a cutoff.
///
/// Both `startTime` and `endTime` must be present and parseable, otherwise
/// the segment is not kept. This never fails: bad data only means "drop".
///
/// # Arguments
///
/// * `segment` - The segment under test
/// * `cutoff` - The cutoff instant (UTC)
/// * `mode` - Which endpoint is compared against the cutoff
pub fn segment_is_kept(segment: &Segment, cutoff: DateTime<Utc>, mode: CutoffMode) -> bool {
    let (Some(start), Some(end)) = (segment.start_time.as_deref(), segment.end_time.as_deref())
    else {
        return false;
    };

    let (start, end) = match (parse_instant(start), parse_instant(end)) {
        (Ok(start), Ok(end)) => (start, end),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "Dropping segment with unparsable timestamps");
            return false;
        }
    };

    match mode {
        CutoffMode::Start => start >= cutoff,
        CutoffMode::End | CutoffMode::Overlap => end >= cutoff,
    }
}

/// Filter the segment sequence of a timeline document in place.
///
/// Entries that are not objects are removed without being evaluated. The
/// kept segments retain their original order and content.
///
/// # Arguments
///
/// * `doc` - The timeline document; its root must be an object with a
///   `semanticSegments` sequence
/// * `cutoff` - The cutoff instant (UTC)
/// * `mode` - Which endpoint is compared against the cutoff
///
/// # Returns
///
/// Kept/removed counts, or [`DayBucketError::InvalidFormat`] when the
/// document does not have the expected shape. Nothing is modified on error.
///
/// # Examples
///
/// ```
/// use daybucket_core::filter::{cutoff_for_year, filter_timeline_doc};
/// use daybucket_core::models::CutoffMode;
/// use serde_json::json;
///
/// let mut doc = json!({
///     "semanticSegments": [
///         {"startTime": "2022-12-31T20:00:00Z", "endTime": "2023-01-01T02:00:00Z"},
///         {"startTime": "2023-02-01T08:00:00Z", "endTime": "2023-02-01T09:00:00Z"}
///     ],
///     "userLocationProfile": {"frequentPlaces": []}
/// });
///
/// let cutoff = cutoff_for_year(2023).unwrap();
/// let result = filter_timeline_doc(&mut doc, cutoff, CutoffMode::Start).unwrap();
/// assert_eq!((result.kept, result.removed), (1, 1));
/// assert_eq!(doc["userLocationProfile"], json!({"frequentPlaces": []}));
/// ```
pub fn filter_timeline_doc(
    doc: &mut Value,
    cutoff: DateTime<Utc>,
    mode: CutoffMode,
) -> Result<FilterResult> {
    let root = doc.as_object_mut().ok_or_else(|| {
        DayBucketError::InvalidFormat("Expected root value to be an object".to_string())
    })?;

    let segments = match root.get_mut(SEGMENTS_KEY) {
        Some(Value::Array(segments)) => segments,
        _ => {
            return Err(DayBucketError::InvalidFormat(format!(
                "Expected top-level key '{}' to be a list",
                SEGMENTS_KEY
            )));
        }
    };

    let before = segments.len();
    segments.retain(|raw| match Segment::from_value(raw) {
        Some(segment) => segment_is_kept(&segment, cutoff, mode),
        None => {
            debug!("Removing non-object segment entry");
            false
        }
    });

    let kept = segments.len();
    Ok(FilterResult {
        kept,
        removed: before - kept,
    })
}
