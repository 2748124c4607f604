//! Day ledger: states, offices and the days worked in them.
//!
//! The ledger is an in-memory record set with a JSON representation. It is
//! the persistence target for matched timeline days; callers decide where
//! the JSON lives.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DayBucketError, Result};

/// Note attached to days created from timeline matches.
pub const TIMELINE_NOTE: &str = "Added via timeline processing for placeId match";

/// A US state with a tax residency day threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    pub abbreviation: String,
    /// Number of days before tax residency is triggered.
    pub day_threshold: u32,
}

/// An office location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Office {
    pub name: String,
    /// Maps place identifier, unique across offices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// Abbreviation of the state the office is in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
}

/// How a worked day is classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayType {
    #[default]
    #[serde(rename = "WORK")]
    StandardWorkday,
    #[serde(rename = "PTO_WORK")]
    PtoWorkday,
    #[serde(rename = "HOLIDAY")]
    CompanyHoliday,
}

/// A single calendar day record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    #[serde(default)]
    pub day_type: DayType,
    /// Abbreviations of the states this day counts toward.
    #[serde(default)]
    pub states: BTreeSet<String>,
    /// Name of the office worked from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
}

/// What setting an office's place identifier would change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceIdChange {
    /// The office already has this identifier.
    Unchanged,
    /// The office has no identifier yet.
    Set,
    /// The office has a different identifier.
    Replace { current: String },
    /// Another office already owns the identifier.
    Conflict { owner: String },
}

/// Whether recording a date created a day or touched an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordReport {
    pub created: usize,
    pub updated: usize,
    pub outcomes: Vec<(NaiveDate, DayOutcome)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Day count of one state against its threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateTally {
    pub name: String,
    pub abbreviation: String,
    pub days: usize,
    pub threshold: u32,
    pub remaining: u32,
    pub reached: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub states: LoadReport,
    pub offices: LoadReport,
}

/// Reference records to merge into a ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LedgerSeed {
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub offices: Vec<Office>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    /// Inclusive calendar length of the requested range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_in_range: Option<i64>,
    /// Distinct days with at least one state.
    pub workdays: usize,
    pub states: Vec<StateTally>,
}

/// States, offices and days, with days kept sorted by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayLedger {
    #[serde(default)]
    states: Vec<State>,
    #[serde(default)]
    offices: Vec<Office>,
    #[serde(default)]
    days: Vec<Day>,
}

impl DayLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a ledger from its JSON representation.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut ledger: DayLedger = serde_json::from_str(text)
            .map_err(|e| DayBucketError::ParseError(format!("Invalid ledger: {}", e)))?;
        ledger.days = merge_duplicate_days(std::mem::take(&mut ledger.days));
        Ok(ledger)
    }

    /// Pretty JSON representation.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DayBucketError::ParseError(format!("Failed to serialize ledger: {}", e)))
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn offices(&self) -> &[Office] {
        &self.offices
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days
            .binary_search_by_key(&date, |day| day.date)
            .ok()
            .map(|index| &self.days[index])
    }

    /// Look up a state by abbreviation, case-insensitively.
    pub fn state(&self, abbreviation: &str) -> Result<&State> {
        self.states
            .iter()
            .find(|state| state.abbreviation.eq_ignore_ascii_case(abbreviation.trim()))
            .ok_or_else(|| {
                DayBucketError::NotFound(format!(
                    "State with abbreviation '{}' not found",
                    abbreviation
                ))
            })
    }

    /// Look up an office by name, case-insensitively.
    pub fn office(&self, name: &str) -> Option<&Office> {
        self.offices
            .iter()
            .find(|office| office.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Describe what setting `place_id` on an office would do.
    pub fn place_id_change(&self, office_name: &str, place_id: &str) -> Result<PlaceIdChange> {
        let office = self.office(office_name).ok_or_else(|| office_not_found(office_name))?;
        if office.place_id.as_deref() == Some(place_id) {
            return Ok(PlaceIdChange::Unchanged);
        }
        if let Some(owner) = place_id_owner(&self.offices, place_id, &office.name) {
            return Ok(PlaceIdChange::Conflict {
                owner: owner.name.clone(),
            });
        }
        Ok(match office.place_id.as_deref() {
            Some(current) => PlaceIdChange::Replace {
                current: current.to_string(),
            },
            None => PlaceIdChange::Set,
        })
    }

    /// Set an office's place identifier once the caller has confirmed it.
    ///
    /// Returns whether the ledger changed. Nothing happens without
    /// confirmation or when the identifier is already set. An identifier
    /// owned by another office is rejected either way.
    pub fn update_office_place_id(
        &mut self,
        office_name: &str,
        place_id: &str,
        confirmed: bool,
    ) -> Result<bool> {
        match self.place_id_change(office_name, place_id)? {
            PlaceIdChange::Unchanged => return Ok(false),
            PlaceIdChange::Conflict { owner } => return Err(place_id_taken(place_id, &owner)),
            PlaceIdChange::Set | PlaceIdChange::Replace { .. } => {}
        }
        if !confirmed {
            debug!(office = office_name, place_id, "Place id update not confirmed");
            return Ok(false);
        }

        let office = self
            .offices
            .iter_mut()
            .find(|office| office.name.eq_ignore_ascii_case(office_name.trim()))
            .ok_or_else(|| office_not_found(office_name))?;
        office.place_id = Some(place_id.to_string());
        info!(office = %office.name, place_id, "Updated office place id");
        Ok(true)
    }

    /// Record that each date was worked in a state.
    ///
    /// Missing days are created as standard workdays. The state is added to
    /// every day; the office is assigned to new days and to existing days
    /// that have none. The state (and office, when given) must exist.
    pub fn record_days(
        &mut self,
        dates: &[NaiveDate],
        state_abbreviation: &str,
        office_name: Option<&str>,
    ) -> Result<RecordReport> {
        let state = self.state(state_abbreviation)?.abbreviation.clone();
        let office = match office_name {
            Some(name) => Some(
                self.office(name)
                    .ok_or_else(|| office_not_found(name))?
                    .name
                    .clone(),
            ),
            None => None,
        };

        let mut report = RecordReport::default();
        for &date in dates {
            let outcome = match self.days.binary_search_by_key(&date, |day| day.date) {
                Ok(index) => {
                    let day = &mut self.days[index];
                    day.states.insert(state.clone());
                    if day.office.is_none() {
                        day.office = office.clone();
                    }
                    report.updated += 1;
                    DayOutcome::Updated
                }
                Err(index) => {
                    self.days.insert(
                        index,
                        Day {
                            date,
                            day_type: DayType::StandardWorkday,
                            states: BTreeSet::from([state.clone()]),
                            office: office.clone(),
                            note: TIMELINE_NOTE.to_string(),
                        },
                    );
                    report.created += 1;
                    DayOutcome::Created
                }
            };
            report.outcomes.push((date, outcome));
        }

        Ok(report)
    }

    /// Merge state records, keyed by abbreviation.
    ///
    /// Existing states are skipped unless `update` is set.
    pub fn load_states(&mut self, records: Vec<State>, update: bool) -> LoadReport {
        let mut report = LoadReport::default();
        for record in records {
            match self
                .states
                .iter_mut()
                .find(|state| state.abbreviation.eq_ignore_ascii_case(&record.abbreviation))
            {
                Some(existing) if update => {
                    existing.name = record.name;
                    existing.day_threshold = record.day_threshold;
                    report.updated += 1;
                }
                Some(_) => report.skipped += 1,
                None => {
                    self.states.push(record);
                    report.created += 1;
                }
            }
        }
        self.states.sort_by(|a, b| a.name.cmp(&b.name));
        report
    }

    /// Merge office records, keyed by name.
    ///
    /// Existing offices are skipped unless `update` is set. An office's
    /// state must already be in the ledger and a place identifier owned by
    /// another office is rejected. On error the ledger is left unchanged.
    pub fn load_offices(&mut self, records: Vec<Office>, update: bool) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        let mut offices = self.offices.clone();
        for mut record in records {
            let existing = offices
                .iter()
                .position(|office| office.name.eq_ignore_ascii_case(record.name.trim()));
            if existing.is_some() && !update {
                report.skipped += 1;
                continue;
            }
            if let Some(abbreviation) = record.state.take() {
                record.state = Some(self.state(&abbreviation)?.abbreviation.clone());
            }
            if let Some(place_id) = record.place_id.as_deref() {
                if let Some(owner) = place_id_owner(&offices, place_id, &record.name) {
                    return Err(place_id_taken(place_id, &owner.name));
                }
            }
            match existing {
                Some(index) => {
                    let office = &mut offices[index];
                    office.place_id = record.place_id;
                    office.state = record.state;
                    office.address = record.address;
                    report.updated += 1;
                }
                None => {
                    offices.push(record);
                    report.created += 1;
                }
            }
        }
        offices.sort_by(|a, b| a.name.cmp(&b.name));
        self.offices = offices;
        Ok(report)
    }

    /// Merge a seed file's states and offices, all or nothing.
    pub fn load_seed(&mut self, seed: LedgerSeed, update: bool) -> Result<SeedReport> {
        let previous_states = self.states.clone();
        let states = self.load_states(seed.states, update);
        match self.load_offices(seed.offices, update) {
            Ok(offices) => Ok(SeedReport { states, offices }),
            Err(e) => {
                self.states = previous_states;
                Err(e)
            }
        }
    }

    /// Per-state day counts, optionally within an inclusive date range.
    pub fn summary(&self, range: Option<(NaiveDate, NaiveDate)>) -> LedgerSummary {
        let in_range = |day: &&Day| match range {
            Some((from, to)) => day.date >= from && day.date <= to,
            None => true,
        };

        let states = self
            .states
            .iter()
            .map(|state| {
                let days = self
                    .days
                    .iter()
                    .filter(in_range)
                    .filter(|day| day.states.contains(&state.abbreviation))
                    .count();
                let counted = u32::try_from(days).unwrap_or(u32::MAX);
                StateTally {
                    name: state.name.clone(),
                    abbreviation: state.abbreviation.clone(),
                    days,
                    threshold: state.day_threshold,
                    remaining: state.day_threshold.saturating_sub(counted),
                    reached: counted >= state.day_threshold,
                }
            })
            .collect();

        LedgerSummary {
            days_in_range: range.map(|(from, to)| (to - from).num_days() + 1),
            workdays: self
                .days
                .iter()
                .filter(in_range)
                .filter(|day| !day.states.is_empty())
                .count(),
            states,
        }
    }
}

/// The office other than `except` that owns `place_id`.
fn place_id_owner<'a>(offices: &'a [Office], place_id: &str, except: &str) -> Option<&'a Office> {
    offices.iter().find(|office| {
        office.place_id.as_deref() == Some(place_id)
            && !office.name.eq_ignore_ascii_case(except.trim())
    })
}

fn place_id_taken(place_id: &str, owner: &str) -> DayBucketError {
    DayBucketError::InvalidArgument(format!(
        "Place id '{}' already belongs to office '{}'",
        place_id, owner
    ))
}

/// Sort days by date, folding records that share a date into one.
fn merge_duplicate_days(mut days: Vec<Day>) -> Vec<Day> {
    days.sort_by_key(|day| day.date);
    let mut merged: Vec<Day> = Vec::with_capacity(days.len());
    for day in days {
        match merged.last_mut() {
            Some(last) if last.date == day.date => {
                debug!(date = %day.date, "Merging duplicate ledger day");
                last.states.extend(day.states);
                if last.office.is_none() {
                    last.office = day.office;
                }
                if last.note.is_empty() {
                    last.note = day.note;
                }
            }
            _ => merged.push(day),
        }
    }
    merged
}

fn office_not_found(name: &str) -> DayBucketError {
    DayBucketError::NotFound(format!("Office '{}' not found", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn state(name: &str, abbreviation: &str, day_threshold: u32) -> State {
        State {
            name: name.to_string(),
            abbreviation: abbreviation.to_string(),
            day_threshold,
        }
    }

    fn office(name: &str, place_id: Option<&str>) -> Office {
        Office {
            name: name.to_string(),
            place_id: place_id.map(str::to_string),
            state: Some("WA".to_string()),
            address: String::new(),
        }
    }

    fn seeded() -> DayLedger {
        let mut ledger = DayLedger::new();
        ledger.load_states(
            vec![state("Washington", "WA", 183), state("California", "CA", 3)],
            false,
        );
        ledger
            .load_offices(vec![office("Seattle HQ", None)], false)
            .unwrap();
        ledger
    }

    #[test]
    fn state_lookup_is_case_insensitive() {
        let ledger = seeded();
        assert_eq!(ledger.state("wa").unwrap().name, "Washington");
        assert!(matches!(
            ledger.state("OR"),
            Err(DayBucketError::NotFound(_))
        ));
    }

    #[test]
    fn record_days_creates_then_updates() {
        let mut ledger = seeded();
        let report = ledger
            .record_days(&[date(2024, 1, 2), date(2024, 1, 3)], "WA", Some("seattle hq"))
            .unwrap();
        assert_eq!((report.created, report.updated), (2, 0));

        let report = ledger
            .record_days(&[date(2024, 1, 3), date(2024, 1, 4)], "CA", None)
            .unwrap();
        assert_eq!((report.created, report.updated), (1, 1));
        assert_eq!(
            report.outcomes,
            vec![
                (date(2024, 1, 3), DayOutcome::Updated),
                (date(2024, 1, 4), DayOutcome::Created)
            ]
        );

        let day = ledger.day(date(2024, 1, 3)).unwrap();
        assert_eq!(
            day.states.iter().cloned().collect::<Vec<_>>(),
            vec!["CA", "WA"]
        );
        assert_eq!(day.office.as_deref(), Some("Seattle HQ"));
        assert_eq!(day.note, TIMELINE_NOTE);
        assert_eq!(ledger.day(date(2024, 1, 4)).unwrap().office, None);
    }

    #[test]
    fn existing_office_is_not_overwritten() {
        let mut ledger = seeded();
        ledger
            .load_offices(vec![office("Bellevue", None)], false)
            .unwrap();
        ledger
            .record_days(&[date(2024, 1, 2)], "WA", Some("Seattle HQ"))
            .unwrap();
        ledger
            .record_days(&[date(2024, 1, 2)], "WA", Some("Bellevue"))
            .unwrap();

        assert_eq!(
            ledger.day(date(2024, 1, 2)).unwrap().office.as_deref(),
            Some("Seattle HQ")
        );
    }

    #[test]
    fn record_days_keeps_days_sorted() {
        let mut ledger = seeded();
        ledger
            .record_days(&[date(2024, 3, 1), date(2024, 1, 1), date(2024, 2, 1)], "WA", None)
            .unwrap();
        let dates: Vec<_> = ledger.days().iter().map(|day| day.date).collect();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 3, 1)]);
    }

    #[test]
    fn record_days_requires_known_state() {
        let mut ledger = seeded();
        assert!(ledger.record_days(&[date(2024, 1, 2)], "ZZ", None).is_err());
        assert!(ledger.days().is_empty());
    }

    #[test]
    fn place_id_update_needs_confirmation() {
        let mut ledger = seeded();
        assert_eq!(
            ledger.place_id_change("Seattle HQ", "ChIJ_new").unwrap(),
            PlaceIdChange::Set
        );

        assert!(!ledger.update_office_place_id("Seattle HQ", "ChIJ_new", false).unwrap());
        assert_eq!(ledger.office("Seattle HQ").unwrap().place_id, None);

        assert!(ledger.update_office_place_id("Seattle HQ", "ChIJ_new", true).unwrap());
        assert_eq!(
            ledger.place_id_change("Seattle HQ", "ChIJ_new").unwrap(),
            PlaceIdChange::Unchanged
        );
        assert_eq!(
            ledger.place_id_change("Seattle HQ", "ChIJ_other").unwrap(),
            PlaceIdChange::Replace {
                current: "ChIJ_new".to_string()
            }
        );
        assert!(!ledger.update_office_place_id("Seattle HQ", "ChIJ_new", true).unwrap());
    }

    #[test]
    fn place_ids_are_unique_across_offices() {
        let mut ledger = seeded();
        ledger
            .load_offices(vec![office("Bellevue", Some("ChIJ_taken"))], false)
            .unwrap();

        let err = ledger
            .update_office_place_id("Seattle HQ", "ChIJ_taken", true)
            .unwrap_err();
        assert!(err.to_string().contains("Bellevue"));
        assert!(
            ledger
                .load_offices(vec![office("Tacoma", Some("ChIJ_taken"))], false)
                .is_err()
        );
    }

    #[test]
    fn place_id_change_reports_owner_before_confirmation() {
        let mut ledger = seeded();
        ledger
            .load_offices(vec![office("Bellevue", Some("ChIJ_taken"))], false)
            .unwrap();

        assert_eq!(
            ledger.place_id_change("Seattle HQ", "ChIJ_taken").unwrap(),
            PlaceIdChange::Conflict {
                owner: "Bellevue".to_string()
            }
        );
        assert_eq!(
            ledger.place_id_change("bellevue", "ChIJ_taken").unwrap(),
            PlaceIdChange::Unchanged
        );
        assert!(
            ledger
                .update_office_place_id("Seattle HQ", "ChIJ_taken", false)
                .is_err()
        );
    }

    #[test]
    fn load_offices_rejects_unknown_state() {
        let mut ledger = seeded();
        let mut portland = office("Portland", None);
        portland.state = Some("OR".to_string());

        let err = ledger.load_offices(vec![portland], false).unwrap_err();
        assert!(matches!(err, DayBucketError::NotFound(_)));
        assert!(ledger.office("Portland").is_none());

        let mut tacoma = office("Tacoma", None);
        tacoma.state = Some("wa".to_string());
        ledger.load_offices(vec![tacoma], false).unwrap();
        assert_eq!(ledger.office("Tacoma").unwrap().state.as_deref(), Some("WA"));
    }

    #[test]
    fn failed_office_batch_changes_nothing() {
        let mut ledger = seeded();
        let before = ledger.clone();

        let result = ledger.load_offices(
            vec![
                office("Bellevue", Some("ChIJ_shared")),
                office("Tacoma", Some("ChIJ_shared")),
            ],
            false,
        );
        assert!(result.is_err());
        assert_eq!(ledger, before);
    }

    #[test]
    fn failed_seed_changes_nothing() {
        let seed: LedgerSeed = serde_json::from_str(
            r#"{
                "states": [{"name": "Oregon", "abbreviation": "OR", "day_threshold": 200}],
                "offices": [{"name": "Boise", "state": "ID"}]
            }"#,
        )
        .unwrap();

        let mut ledger = seeded();
        let before = ledger.clone();
        assert!(ledger.load_seed(seed, false).is_err());
        assert_eq!(ledger, before);
        assert!(ledger.state("OR").is_err());
    }

    #[test]
    fn load_states_skips_or_updates() {
        let mut ledger = seeded();
        let report = ledger.load_states(
            vec![state("Washington State", "WA", 180), state("Oregon", "OR", 200)],
            false,
        );
        assert_eq!(
            report,
            LoadReport {
                created: 1,
                updated: 0,
                skipped: 1
            }
        );
        assert_eq!(ledger.state("WA").unwrap().day_threshold, 183);

        let report = ledger.load_states(vec![state("Washington State", "wa", 180)], true);
        assert_eq!(report.updated, 1);
        assert_eq!(ledger.state("WA").unwrap().day_threshold, 180);
        assert_eq!(ledger.state("WA").unwrap().abbreviation, "WA");

        let names: Vec<_> = ledger.states().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["California", "Oregon", "Washington State"]);
    }

    #[test]
    fn load_offices_skips_or_updates() {
        let mut ledger = seeded();
        let report = ledger
            .load_offices(
                vec![office("seattle hq", Some("ChIJ_hq")), office("Bellevue", None)],
                false,
            )
            .unwrap();
        assert_eq!((report.created, report.skipped), (1, 1));
        assert_eq!(ledger.office("Seattle HQ").unwrap().place_id, None);

        let report = ledger
            .load_offices(vec![office("Seattle HQ", Some("ChIJ_hq"))], true)
            .unwrap();
        assert_eq!(report.updated, 1);
        assert_eq!(
            ledger.office("Seattle HQ").unwrap().place_id.as_deref(),
            Some("ChIJ_hq")
        );

        let names: Vec<_> = ledger.offices().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Bellevue", "Seattle HQ"]);
    }

    #[test]
    fn load_seed_merges_both_sections() {
        let seed: LedgerSeed = serde_json::from_str(
            r#"{
                "states": [{"name": "Oregon", "abbreviation": "OR", "day_threshold": 200}],
                "offices": [{"name": "Portland", "state": "OR", "place_id": "ChIJ_pdx"}]
            }"#,
        )
        .unwrap();

        let mut ledger = seeded();
        let report = ledger.load_seed(seed, false).unwrap();
        assert_eq!(report.states.created, 1);
        assert_eq!(report.offices.created, 1);
        assert_eq!(ledger.office("portland").unwrap().state.as_deref(), Some("OR"));
    }

    #[test]
    fn summary_counts_against_thresholds() {
        let mut ledger = seeded();
        let january: Vec<_> = date(2024, 1, 1).iter_days().take(5).collect();
        ledger.record_days(&january, "WA", None).unwrap();
        ledger
            .record_days(&[date(2024, 1, 2), date(2024, 1, 3), date(2024, 2, 1)], "CA", None)
            .unwrap();

        let all = ledger.summary(None);
        assert_eq!(all.days_in_range, None);
        assert_eq!(all.workdays, 6);
        let california = &all.states[0];
        assert_eq!(california.abbreviation, "CA");
        assert_eq!((california.days, california.remaining), (3, 0));
        assert!(california.reached);
        let washington = &all.states[1];
        assert_eq!((washington.days, washington.remaining), (5, 178));
        assert!(!washington.reached);

        let window = ledger.summary(Some((date(2024, 1, 3), date(2024, 1, 31))));
        assert_eq!(window.days_in_range, Some(29));
        assert_eq!(window.workdays, 3);
        assert_eq!(window.states[0].days, 1);
        assert_eq!(window.states[1].days, 3);
    }

    #[test]
    fn json_round_trip() {
        let mut ledger = seeded();
        ledger
            .record_days(&[date(2024, 1, 2)], "WA", Some("Seattle HQ"))
            .unwrap();

        let text = ledger.to_json().unwrap();
        assert!(text.contains("\"date\": \"2024-01-02\""));
        assert!(text.contains("\"day_type\": \"WORK\""));
        assert_eq!(DayLedger::from_json(&text).unwrap(), ledger);
    }

    #[test]
    fn from_json_sorts_days_and_accepts_missing_sections() {
        let ledger = DayLedger::from_json(
            r#"{"days": [
                {"date": "2024-02-01", "states": ["WA"]},
                {"date": "2024-01-01", "day_type": "HOLIDAY"}
            ]}"#,
        )
        .unwrap();

        assert!(ledger.states().is_empty());
        assert_eq!(ledger.days()[0].date, date(2024, 1, 1));
        assert_eq!(ledger.days()[0].day_type, DayType::CompanyHoliday);
        assert!(DayLedger::from_json(r#"{"days": "nope"}"#).is_err());
    }

    #[test]
    fn from_json_merges_days_with_the_same_date() {
        let ledger = DayLedger::from_json(
            r#"{"days": [
                {"date": "2024-01-02", "states": ["WA"]},
                {"date": "2024-01-01", "states": ["WA"]},
                {"date": "2024-01-02", "states": ["CA"], "office": "Seattle HQ", "note": "late"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(ledger.days().len(), 2);
        let day = ledger.day(date(2024, 1, 2)).unwrap();
        assert_eq!(
            day.states,
            BTreeSet::from(["CA".to_string(), "WA".to_string()])
        );
        assert_eq!(day.office.as_deref(), Some("Seattle HQ"));
        assert_eq!(day.note, "late");
    }
}
