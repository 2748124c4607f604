//! Typed view of a timeline segment.
//!
//! Exports are loosely shaped: any nested field may be missing, null, or of
//! an unexpected type. Every field here is an explicit `Option` and a value
//! of the wrong shape reads as absent instead of failing the whole segment.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One interval of recorded activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default, deserialize_with = "lenient")]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub visit: Option<Visit>,
    #[serde(default, deserialize_with = "lenient")]
    pub timeline_memory: Option<TimelineMemory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    #[serde(default, deserialize_with = "lenient")]
    pub top_candidate: Option<PlaceCandidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCandidate {
    #[serde(default, deserialize_with = "lenient")]
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMemory {
    #[serde(default, deserialize_with = "lenient")]
    pub trip: Option<Trip>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub destinations: Vec<PlaceCandidate>,
}

impl Segment {
    /// Read a segment out of a raw document entry.
    ///
    /// Returns `None` when the entry is not an object.
    pub fn from_value(value: &Value) -> Option<Segment> {
        if !value.is_object() {
            return None;
        }
        Segment::deserialize(value).ok()
    }

    /// Place identifier of the visit's top candidate, if any.
    pub fn visit_place_id(&self) -> Option<&str> {
        self.visit
            .as_ref()?
            .top_candidate
            .as_ref()?
            .place_id
            .as_deref()
    }

    /// Place identifiers of the trip destinations, in document order.
    pub fn destination_place_ids(&self) -> impl Iterator<Item = &str> {
        self.timeline_memory
            .as_ref()
            .and_then(|memory| memory.trip.as_ref())
            .into_iter()
            .flat_map(|trip| trip.destinations.iter())
            .filter_map(|destination| destination.place_id.as_deref())
    }

    /// Both endpoints, when both are present and non-empty.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let start = self.start_time.as_deref().filter(|s| !s.is_empty())?;
        let end = self.end_time.as_deref().filter(|s| !s.is_empty())?;
        Some((start, end))
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
