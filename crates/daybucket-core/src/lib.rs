//! # daybucket-core
//!
//! DST-aware bucketing of location-history timelines into calendar days.
//!
//! A timeline export is a list of "semantic segments", each with a start
//! and end instant and optional place identifiers. This library turns those
//! segments into the set of local calendar days spent at a place, and
//! keeps a small ledger of which days counted toward which state.
//!
//! ## Features
//!
//! - **Local days, not UTC days**: instants are converted into an IANA
//!   timezone using the offset in effect at each instant before dates are
//!   taken, and spans are expanded one calendar day at a time.
//! - **Forgiving input**: missing or malformed segment fields never abort a
//!   run; the segment is skipped and a warning is logged.
//! - **Cutoff filtering**: trim a timeline to the segments at or after an
//!   instant while preserving every other field of the document.
//! - **Weekday allow-lists**: restrict matches to e.g. Monday through Friday.
//! - **JSON or YAML** timelines, with key order preserved.
//!
//! ## Example
//!
//! ```rust
//! use daybucket_core::prelude::*;
//! use serde_json::json;
//!
//! let timeline = json!({
//!     "semanticSegments": [{
//!         "startTime": "2024-03-08T17:00:00Z",
//!         "endTime": "2024-03-11T17:00:00Z",
//!         "visit": {"topCandidate": {"placeId": "ChIJ_office"}}
//!     }]
//! });
//!
//! let tz = parse_tz("America/Los_Angeles").unwrap();
//! let weekdays = parse_days_of_week("mon,tue,wed,thu,fri").unwrap();
//! let days = find_matching_days(&timeline, "ChIJ_office", tz, Some(&weekdays));
//!
//! // Friday and the following Monday; the weekend is filtered out
//! assert_eq!(days.len(), 2);
//! ```

pub mod aggregate;
pub mod document;
pub mod error;
pub mod extract;
pub mod filter;
pub mod ledger;
pub mod models;
pub mod parse;
pub mod segment;
pub mod tz;
pub mod weekday;

// Re-export commonly used types at the crate root
pub use aggregate::{find_matching_days, match_days};
pub use document::{DocumentFormat, parse_document, to_yaml_string};
pub use error::{DayBucketError, Result};
pub use extract::{extract_dates_from_segment, segment_contains_place_id};
pub use filter::{cutoff_for_year, filter_timeline_doc, segment_is_kept};
pub use ledger::{DayLedger, LedgerSeed, PlaceIdChange};
pub use models::{CutoffMode, FilterResult, MatchReport, SEGMENTS_KEY};
pub use parse::parse_instant;
pub use segment::Segment;
pub use weekday::{Weekdays, filter_by_weekday, parse_days_of_week};

/// Prelude module for convenient imports.
///
/// ```
/// use daybucket_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregate::{find_matching_days, match_days};
    pub use crate::document::{DocumentFormat, parse_document, to_yaml_string};
    pub use crate::error::{DayBucketError, Result};
    pub use crate::extract::{extract_dates_from_segment, segment_contains_place_id};
    pub use crate::filter::{cutoff_for_year, filter_timeline_doc, segment_is_kept};
    pub use crate::models::*;
    pub use crate::parse::parse_instant;
    pub use crate::segment::Segment;
    pub use crate::tz::parse_tz;
    pub use crate::weekday::{Weekdays, filter_by_weekday, parse_days_of_week};
}
