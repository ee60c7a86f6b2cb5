//! Calendar day keys
//!
//! Records come from the backend with due dates serialized in various ways (plain dates, RFC 3339 timestamps, PostgreSQL
//! `timestamptz` output...). A [`DayKey`] is the normalized, day-granularity form they are grouped by.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CalendarError;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Date-times carrying an offset. The key is the date as written, in that offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];


/// A calendar date at day granularity.
///
/// Displays (and serializes) as `YYYY-MM-DD`, and orders chronologically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The current day, in the local timezone
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Read a day out of any of the date forms the backend may produce.
    ///
    /// Time-of-day and offsets are discarded: `2025-03-13T00:00:00Z` and `2025-03-13T23:00:00Z` are the same day.
    pub fn parse(input: &str) -> Result<Self, CalendarError> {
        let s = input.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, DAY_FORMAT) {
            return Ok(Self(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.naive_local().date()));
        }
        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(s, format) {
                return Ok(Self(dt.naive_local().date()));
            }
        }
        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(dt.date()));
            }
        }

        Err(CalendarError::InvalidDay(input.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The day after this one, or `None` at the end of the supported range
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// A long, human-readable label, e.g. "Thursday, March 13"
    pub fn heading(&self) -> String {
        self.0.format("%A, %B %-d").to_string()
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DayKey {
    type Err = CalendarError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

/// Used to support serde
impl Serialize for DayKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D>(deserializer: D) -> Result<DayKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DayKey::parse(&s).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> String {
        DayKey::parse(s).unwrap().to_string()
    }

    #[test]
    fn same_day_regardless_of_time() {
        assert_eq!(key("2025-03-13T00:00:00Z"), "2025-03-13");
        assert_eq!(key("2025-03-13T23:00:00Z"), "2025-03-13");
        assert_eq!(
            DayKey::parse("2025-03-13T00:00:00Z").unwrap(),
            DayKey::parse("2025-03-13T23:00:00Z").unwrap()
        );
    }

    #[test]
    fn accepted_forms() {
        assert_eq!(key("2025-03-13"), "2025-03-13");
        assert_eq!(key(" 2025-03-13 "), "2025-03-13");
        assert_eq!(key("2025-03-13T23:30:00+02:00"), "2025-03-13");
        assert_eq!(key("2025-03-13T00:15:00-05:00"), "2025-03-13");
        assert_eq!(key("2025-03-13T08:00:00.123Z"), "2025-03-13");
        assert_eq!(key("2025-03-13 08:00:00+00"), "2025-03-13");
        assert_eq!(key("2025-03-13 08:00:00.5+0100"), "2025-03-13");
        assert_eq!(key("2025-03-13T08:00:00"), "2025-03-13");
        assert_eq!(key("2025-03-13 08:00"), "2025-03-13");
    }

    #[test]
    fn rejected_forms() {
        for bad in &["", "13/03/2025", "2025-02-30", "tomorrow", "2025-03-13Tnoon"] {
            match DayKey::parse(bad) {
                Err(CalendarError::InvalidDay(s)) => assert_eq!(&s, bad),
                other => panic!("{:?} should not parse: {:?}", bad, other),
            }
        }
    }

    #[test]
    fn ordering_and_labels() {
        let a = DayKey::from_ymd(2025, 3, 11).unwrap();
        let b = DayKey::from_ymd(2025, 3, 13).unwrap();
        assert!(a < b);
        assert_eq!(a.succ(), DayKey::from_ymd(2025, 3, 12));
        assert_eq!(b.heading(), "Thursday, March 13");
    }

    #[test]
    fn serde_as_string() {
        let day = DayKey::from_ymd(2025, 3, 1).unwrap();
        assert_eq!(serde_json::to_string(&day).unwrap(), "\"2025-03-01\"");
        let back: DayKey = serde_json::from_str("\"2025-03-01T12:00:00Z\"").unwrap();
        assert_eq!(back, day);
    }
}
