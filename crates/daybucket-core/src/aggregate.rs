//! Aggregation of matching days across a whole timeline.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::Value;
use tracing::debug;

use crate::extract::{extract_dates_from_segment, segment_contains_place_id};
use crate::models::{MatchReport, SEGMENTS_KEY};
use crate::segment::Segment;
use crate::weekday::{Weekdays, filter_by_weekday};

/// The raw segment entries of a document.
///
/// Accepts either a bare sequence of segments or an object holding them
/// under `semanticSegments`. Anything else has no segments.
pub fn segments_of(doc: &Value) -> &[Value] {
    match doc {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get(SEGMENTS_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// Scan a timeline for the local days spent at a place.
///
/// Every segment referencing `target_place_id` contributes the local dates
/// it touches (see [`extract_dates_from_segment`]), restricted to
/// `allowed_weekdays` when given. Dates are unioned across segments.
///
/// # Arguments
///
/// * `doc` - A timeline document or a bare list of segments
/// * `target_place_id` - The place identifier to look for
/// * `tz` - The timezone in which days are counted
/// * `allowed_weekdays` - Optional weekday allow-list
pub fn match_days(
    doc: &Value,
    target_place_id: &str,
    tz: Tz,
    allowed_weekdays: Option<&Weekdays>,
) -> MatchReport {
    let mut days = BTreeSet::new();
    let mut segments_scanned = 0;
    let mut segments_matched = 0;

    for segment in segments_of(doc).iter().filter_map(Segment::from_value) {
        segments_scanned += 1;
        if !segment_contains_place_id(&segment, target_place_id) {
            continue;
        }
        segments_matched += 1;

        let dates = filter_by_weekday(extract_dates_from_segment(&segment, tz), allowed_weekdays);
        days.extend(dates);
    }

    debug!(
        segments_scanned,
        segments_matched,
        days = days.len(),
        "Scanned timeline for {}",
        target_place_id
    );

    MatchReport {
        days: days.into_iter().collect(),
        segments_scanned,
        segments_matched,
    }
}

/// Sorted, distinct local dates spent at a place.
///
/// # Examples
///
/// ```
/// use daybucket_core::aggregate::find_matching_days;
/// use daybucket_core::tz::parse_tz;
/// use chrono::NaiveDate;
/// use serde_json::json;
///
/// let timeline = json!([
///     {
///         "startTime": "2024-03-04T17:00:00Z",
///         "endTime": "2024-03-05T01:00:00Z",
///         "visit": {"topCandidate": {"placeId": "ChIJ_office"}}
///     },
///     {
///         "startTime": "2024-03-04T20:00:00Z",
///         "endTime": "2024-03-04T21:00:00Z",
///         "visit": {"topCandidate": {"placeId": "ChIJ_office"}}
///     }
/// ]);
///
/// let days = find_matching_days(&timeline, "ChIJ_office", parse_tz("UTC").unwrap(), None);
/// assert_eq!(
///     days,
///     vec![
///         NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
///     ]
/// );
/// ```
pub fn find_matching_days(
    doc: &Value,
    target_place_id: &str,
    tz: Tz,
    allowed_weekdays: Option<&Weekdays>,
) -> Vec<NaiveDate> {
    match_days(doc, target_place_id, tz, allowed_weekdays).days
}
