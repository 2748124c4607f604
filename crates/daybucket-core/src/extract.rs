//! Place matching and local-date expansion of single segments.

use chrono::NaiveDate;
use chrono_tz::Tz;
use tracing::{trace, warn};

use crate::error::Result;
use crate::parse::parse_instant;
use crate::segment::Segment;
use crate::tz::{format_rfc3339, local_date, utc_to_local};

/// Whether a segment references `target_id`.
///
/// The visit's top candidate is checked first, then each trip destination.
/// Missing nested fields simply do not match.
pub fn segment_contains_place_id(segment: &Segment, target_id: &str) -> bool {
    segment.visit_place_id() == Some(target_id)
        || segment.destination_place_ids().any(|id| id == target_id)
}

/// Every local calendar date a segment touches in `tz`.
///
/// Both endpoints are converted to local time using the offset in effect at
/// each instant; the result runs from the start's local date through the
/// end's local date inclusive, one calendar day at a time. A segment without
/// both endpoints, or whose timestamps do not parse, yields no dates.
///
/// # Arguments
///
/// * `segment` - The segment to expand
/// * `tz` - The timezone in which days are counted
///
/// # Examples
///
/// ```
/// use daybucket_core::extract::extract_dates_from_segment;
/// use daybucket_core::segment::Segment;
/// use daybucket_core::tz::parse_tz;
/// use chrono::NaiveDate;
///
/// let segment = Segment {
///     start_time: Some("2023-01-01T23:30:00Z".into()),
///     end_time: Some("2023-01-02T01:00:00Z".into()),
///     ..Default::default()
/// };
///
/// // 15:30 to 17:00 on Jan 1 in Los Angeles, although the UTC dates differ
/// let dates = extract_dates_from_segment(&segment, parse_tz("America/Los_Angeles").unwrap());
/// assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()]);
/// ```
pub fn extract_dates_from_segment(segment: &Segment, tz: Tz) -> Vec<NaiveDate> {
    let Some((start, end)) = segment.endpoints() else {
        return Vec::new();
    };

    match local_date_span(start, end, tz) {
        Ok(dates) => dates,
        Err(e) => {
            warn!(error = %e, start, end, "Error parsing dates for segment");
            Vec::new()
        }
    }
}

fn local_date_span(start: &str, end: &str, tz: Tz) -> Result<Vec<NaiveDate>> {
    let start_utc = parse_instant(start)?;
    let end_utc = parse_instant(end)?;

    trace!(
        start_local = %format_rfc3339(&utc_to_local(start_utc, tz)),
        end_local = %format_rfc3339(&utc_to_local(end_utc, tz)),
        "Expanding segment"
    );

    let first = local_date(start_utc, tz);
    let last = local_date(end_utc, tz);

    Ok(first.iter_days().take_while(|date| *date <= last).collect())
}
