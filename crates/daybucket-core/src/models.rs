//! Core data types for daybucket.
//!
//! This module defines the small value types passed between the filter,
//! the aggregator and the callers:
//! - [`CutoffMode`] - Which segment endpoint is compared against a cutoff
//! - [`FilterResult`] - Kept/removed counts of a document filter pass
//! - [`MatchReport`] - Matching days plus scan counts of an aggregation pass

use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::DayBucketError;

/// Top-level document key holding the segment sequence.
pub const SEGMENTS_KEY: &str = "semanticSegments";

/// How a segment is compared against a cutoff instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CutoffMode {
    /// Keep segments whose start is at or after the cutoff.
    #[default]
    Start,
    /// Keep segments whose end is at or after the cutoff.
    End,
    /// Keep segments overlapping `[cutoff, +inf)`.
    ///
    /// For an interval unbounded toward the future this reduces to the
    /// `End` test; a bounded window would also need `start <= window_end`.
    Overlap,
}

impl std::fmt::Display for CutoffMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CutoffMode::Start => write!(f, "start"),
            CutoffMode::End => write!(f, "end"),
            CutoffMode::Overlap => write!(f, "overlap"),
        }
    }
}

impl FromStr for CutoffMode {
    type Err = DayBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(CutoffMode::Start),
            "end" => Ok(CutoffMode::End),
            "overlap" => Ok(CutoffMode::Overlap),
            _ => Err(DayBucketError::InvalidArgument(format!(
                "Unknown mode: '{}'. Expected 'start', 'end', or 'overlap'",
                s
            ))),
        }
    }
}

/// Outcome of filtering a timeline document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterResult {
    /// Segments left in the document.
    pub kept: usize,
    /// Segments dropped, including entries that were not segments at all.
    pub removed: usize,
}

/// Outcome of scanning a document for days spent at a place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    /// Sorted, distinct local dates.
    pub days: Vec<NaiveDate>,
    /// Segment records inspected (non-object entries are not counted).
    pub segments_scanned: usize,
    /// Segments that referenced the target place.
    pub segments_matched: usize,
}
