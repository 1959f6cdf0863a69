use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Error type for date key parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateKeyError {
    #[error("date is empty")]
    Empty,
    #[error("invalid date \"{0}\": expected YYYY-MM-DD")]
    Malformed(String),
    #[error("invalid date \"{0}\": no such calendar day")]
    NoSuchDay(String),
    #[error("year {0} is outside 0000-9999")]
    YearOutOfRange(i32),
}

/// A calendar day in canonical `YYYY-MM-DD` form.
///
/// This is the only identity used to group tasks. Ordering is chronological,
/// which for four-digit years is also the lexical order of the string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Build a key from a year, a 1-based month and a day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateKeyError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            DateKeyError::NoSuchDay(format!("{:04}-{:02}-{:02}", year, month, day))
        })?;
        Self::try_from(date)
    }

    /// Today in the local calendar.
    pub fn today() -> Result<Self, DateKeyError> {
        Self::try_from(chrono::Local::now().date_naive())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Zero-based month (0 = January), matching `MonthCursor`.
    pub fn month0(self) -> u32 {
        self.0.month0()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }
}

impl TryFrom<NaiveDate> for DateKey {
    type Error = DateKeyError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        if !(0..=9999).contains(&date.year()) {
            return Err(DateKeyError::YearOutOfRange(date.year()));
        }
        Ok(DateKey(date))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DateKeyError::Empty);
        }
        let malformed = || DateKeyError::Malformed(s.to_string());

        let parts: Vec<&str> = s.split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(malformed());
        };
        let widths_ok = year.len() == 4 && month.len() == 2 && day.len() == 2;
        let digits_ok = parts.iter().all(|p| p.bytes().all(|b| b.is_ascii_digit()));
        if !widths_ok || !digits_ok {
            return Err(malformed());
        }

        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        let day: u32 = day.parse().map_err(|_| malformed())?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DateKey)
            .ok_or_else(|| DateKeyError::NoSuchDay(s.to_string()))
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}
