//! Weekday allow-lists.
//!
//! Weekdays are indexed Monday = 0 .. Sunday = 6, matching
//! [`chrono::Weekday::num_days_from_monday`].

use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{DayBucketError, Result};

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A set of weekdays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Weekdays(u8);

impl Weekdays {
    /// Monday through Friday.
    pub const WORKWEEK: Weekdays = Weekdays(0b0001_1111);

    /// The empty set.
    pub const fn empty() -> Self {
        Weekdays(0)
    }

    /// Build a set from weekday indices (Monday = 0).
    ///
    /// Returns [`DayBucketError::InvalidArgument`] for an index above 6.
    pub fn from_indices(indices: impl IntoIterator<Item = u32>) -> Result<Self> {
        let mut set = Weekdays::empty();
        for index in indices {
            let day = ALL_WEEKDAYS.get(index as usize).ok_or_else(|| {
                DayBucketError::InvalidArgument(format!(
                    "Weekday index {} out of range (0 = Monday .. 6 = Sunday)",
                    index
                ))
            })?;
            set.insert(*day);
        }
        Ok(set)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << day.num_days_from_monday();
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Member indices in ascending order.
    pub fn indices(&self) -> Vec<u32> {
        self.iter().map(|day| day.num_days_from_monday()).collect()
    }

    /// Members from Monday to Sunday.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS.into_iter().filter(|day| self.contains(*day))
    }
}

impl std::fmt::Display for Weekdays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.iter().map(|day| day.to_string().to_lowercase()).collect();
        write!(f, "{}", names.join(","))
    }
}

impl FromStr for Weekdays {
    type Err = DayBucketError;

    fn from_str(s: &str) -> Result<Self> {
        parse_days_of_week(s)
    }
}

fn weekday_from_token(token: &str) -> Option<Weekday> {
    match token {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parse a human-written, comma-separated weekday list.
///
/// Names and common abbreviations are accepted case-insensitively and
/// blank items are ignored. Every unrecognized token is reported in a
/// single error.
///
/// # Examples
///
/// ```
/// use daybucket_core::weekday::{parse_days_of_week, Weekdays};
///
/// assert_eq!(parse_days_of_week("mon,Tue, wed,THURS,friday").unwrap(), Weekdays::WORKWEEK);
///
/// let err = parse_days_of_week("mon,funday,caturday").unwrap_err();
/// assert!(err.to_string().contains("funday, caturday"));
/// ```
pub fn parse_days_of_week(value: &str) -> Result<Weekdays> {
    let tokens: Vec<String> = value
        .split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(DayBucketError::InvalidArgument(
            "Days-of-week list was provided but empty".to_string(),
        ));
    }

    let mut set = Weekdays::empty();
    let mut unknown = Vec::new();
    for token in &tokens {
        match weekday_from_token(token) {
            Some(day) => set.insert(day),
            None => unknown.push(token.as_str()),
        }
    }

    if !unknown.is_empty() {
        return Err(DayBucketError::InvalidArgument(format!(
            "Unknown day(s) in days-of-week: {}",
            unknown.join(", ")
        )));
    }

    Ok(set)
}

/// Keep the dates whose weekday is allowed. `None` allows every day.
pub fn filter_by_weekday(dates: Vec<NaiveDate>, allowed: Option<&Weekdays>) -> Vec<NaiveDate> {
    match allowed {
        None => dates,
        Some(allowed) => dates
            .into_iter()
            .filter(|date| allowed.contains(date.weekday()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week_from(year: i32, month: u32, day: u32) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        start.iter_days().take(7).collect()
    }

    #[test]
    fn workweek_keeps_five_days() {
        // 2024-03-04 is a Monday
        let week = week_from(2024, 3, 4);
        let kept = filter_by_weekday(week.clone(), Some(&Weekdays::WORKWEEK));

        assert_eq!(kept.len(), 5);
        assert_eq!(kept, week[..5].to_vec());
    }

    #[test]
    fn none_is_pass_through() {
        let week = week_from(2024, 3, 6);
        assert_eq!(filter_by_weekday(week.clone(), None), week);
    }

    #[test]
    fn empty_set_keeps_nothing() {
        let week = week_from(2024, 3, 6);
        assert!(filter_by_weekday(week, Some(&Weekdays::empty())).is_empty());
    }

    #[test]
    fn parse_is_case_insensitive_and_accepts_abbreviations() {
        let set = parse_days_of_week(" SAT , sunday,, ").unwrap();
        assert_eq!(set.indices(), vec![5, 6]);

        let set = parse_days_of_week("tues,thur").unwrap();
        assert_eq!(set.indices(), vec![1, 3]);
    }

    #[test]
    fn parse_reports_every_unknown_token() {
        let err = parse_days_of_week("mon,funday,wed,noday").unwrap_err();
        assert!(matches!(err, DayBucketError::InvalidArgument(_)));
        let message = err.to_string();
        assert!(message.contains("funday"));
        assert!(message.contains("noday"));
        assert!(!message.contains("wed"));
    }

    #[test]
    fn parse_rejects_empty_list() {
        assert!(parse_days_of_week(" , ,").is_err());
        assert!(parse_days_of_week("").is_err());
    }

    #[test]
    fn from_indices_round_trips_workweek() {
        let set = Weekdays::from_indices([0, 1, 2, 3, 4]).unwrap();
        assert_eq!(set, Weekdays::WORKWEEK);
        assert!(Weekdays::from_indices([7]).is_err());
    }

    #[test]
    fn display_lists_members() {
        assert_eq!(Weekdays::WORKWEEK.to_string(), "mon,tue,wed,thu,fri");
        assert_eq!("sun,mon".parse::<Weekdays>().unwrap().to_string(), "mon,sun");
    }
}
