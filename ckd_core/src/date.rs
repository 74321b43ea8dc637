//! Calendar-day keys for the completion log.
//!
//! A [`DateKey`] is a local calendar day with no time-of-day component.
//! Its canonical text form is `YYYY-MM-DD`, which is also how it is
//! serialized as a JSON map key. Parsing accepts only that exact form, so
//! two different stored keys can never collapse onto the same day.

use crate::Error;
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical calendar-day identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wrap a calendar date
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, `None` if the date does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The current local calendar day
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// The calendar day `days` days before this one
    ///
    /// Saturates at the earliest representable date.
    pub fn days_before(&self, days: u64) -> Self {
        self.checked_days_before(days)
            .unwrap_or(Self(NaiveDate::MIN))
    }

    /// The calendar day `days` days before this one, `None` past the
    /// earliest representable date
    pub fn checked_days_before(&self, days: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(days)).map(Self)
    }

    /// The calendar day immediately before this one
    pub fn pred(&self) -> Self {
        self.days_before(1)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Single-letter weekday label ("M", "T", ...)
    pub fn weekday_initial(&self) -> char {
        match self.0.weekday() {
            chrono::Weekday::Mon => 'M',
            chrono::Weekday::Tue | chrono::Weekday::Thu => 'T',
            chrono::Weekday::Wed => 'W',
            chrono::Weekday::Fri => 'F',
            chrono::Weekday::Sat | chrono::Weekday::Sun => 'S',
        }
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| Error::InvalidDate(s.to_string()))?;

        // chrono also takes unpadded fields such as "2024-6-5"
        if key.to_string() != s {
            return Err(Error::InvalidDate(s.to_string()));
        }
        Ok(key)
    }
}

struct DateKeyVisitor;

impl<'de> Visitor<'de> for DateKeyVisitor {
    type Value = DateKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a calendar date in YYYY-MM-DD form")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(DateKeyVisitor)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_canonical_text_form() {
        let d = DateKey::from_ymd(2024, 3, 7).unwrap();
        assert_eq!(d.to_string(), "2024-03-07");
        assert_eq!(key("2024-03-07"), d);
    }

    #[test]
    fn test_days_before_crosses_month_and_year() {
        assert_eq!(key("2024-03-01").pred(), key("2024-02-29"));
        assert_eq!(key("2024-01-01").days_before(1), key("2023-12-31"));
        assert_eq!(key("2024-01-10").days_before(10), key("2023-12-31"));
        assert_eq!(key("2024-01-10").days_before(0), key("2024-01-10"));
    }

    #[test]
    fn test_days_before_saturates() {
        let earliest = DateKey::new(NaiveDate::MIN);
        assert_eq!(earliest.pred(), earliest);
        assert_eq!(earliest.checked_days_before(1), None);
        assert_eq!(earliest.checked_days_before(0), Some(earliest));
    }

    #[test]
    fn test_rejects_non_canonical_forms() {
        for text in ["2024-6-15", "2024-06-5", " 2024-06-15", "2024-06-15 ", "+2024-06-15"] {
            assert!(
                text.parse::<DateKey>().is_err(),
                "accepted non-canonical date {:?}",
                text
            );
            let json = format!("{:?}", text);
            assert!(serde_json::from_str::<DateKey>(&json).is_err());
        }
    }

    #[test]
    fn test_rejects_non_dates() {
        assert!(matches!(
            "2024-02-30".parse::<DateKey>(),
            Err(Error::InvalidDate(_))
        ));
        assert!("yesterday".parse::<DateKey>().is_err());
        assert!("2024-02-03T10:00:00".parse::<DateKey>().is_err());
    }

    #[test]
    fn test_json_map_key_form() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(key("2024-05-02"), 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"2024-05-02":1}"#);

        let parsed: std::collections::BTreeMap<DateKey, i32> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[&key("2024-05-02")], 1);
    }

    #[test]
    fn test_weekday_initial() {
        // 2024-05-06 is a Monday
        assert_eq!(key("2024-05-06").weekday_initial(), 'M');
        assert_eq!(key("2024-05-08").weekday_initial(), 'W');
        assert_eq!(key("2024-05-12").weekday_initial(), 'S');
    }
}
