//! Calendar date of an expense
//!
//! The backend sends either a bare `YYYY-MM-DD` or a full ISO datetime. Only
//! the calendar date matters; the time of day is discarded. A value that
//! cannot be read as a date is kept as raw text so it can still be shown,
//! and every date-bounded predicate treats it as "no date".

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::wire::lenient_text;

/// Format for calendar dates on the wire and on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date an expense was incurred
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpenseDate {
    raw: String,
    parsed: Option<NaiveDate>,
}

impl ExpenseDate {
    /// Wrap a known calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            raw: date.format(DATE_FORMAT).to_string(),
            parsed: Some(date),
        }
    }

    /// Read a wire value, keeping it raw when it is not a date
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            parsed: parse_calendar_date(raw),
        }
    }

    /// The calendar date, if the wire value was readable
    pub fn date(&self) -> Option<NaiveDate> {
        self.parsed
    }

    /// The value exactly as received
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_valid(&self) -> bool {
        self.parsed.is_some()
    }
}

/// Parse `YYYY-MM-DD`, ignoring any `THH:MM:SS...` or ` HH:MM` suffix
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

impl From<NaiveDate> for ExpenseDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parsed {
            Some(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            None => f.write_str(&self.raw),
        }
    }
}

impl Serialize for ExpenseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for ExpenseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient_text(deserializer)?.unwrap_or_default();
        let date = Self::parse(&raw);
        if !date.is_valid() && !raw.is_empty() {
            log::warn!("Unreadable expense date '{}', excluding it from date ranges", raw);
        }
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_date() {
        let date = ExpenseDate::parse("2024-07-18");
        assert_eq!(date.date(), Some(ymd(2024, 7, 18)));
        assert_eq!(date.to_string(), "2024-07-18");
    }

    #[test]
    fn test_datetime_keeps_calendar_date() {
        let date = ExpenseDate::parse("2024-07-18T23:30:00.000+00:00");
        assert_eq!(date.date(), Some(ymd(2024, 7, 18)));
        assert_eq!(date.raw(), "2024-07-18T23:30:00.000+00:00");
    }

    #[test]
    fn test_garbage_is_kept_raw() {
        let date = ExpenseDate::parse("last tuesday");
        assert!(!date.is_valid());
        assert_eq!(date.to_string(), "last tuesday");

        assert!(ExpenseDate::parse("2024-02-30").date().is_none());
    }

    #[test]
    fn test_non_string_date_is_unreadable() {
        let date: ExpenseDate = serde_json::from_str("[2024, 7, 19]").unwrap();
        assert!(!date.is_valid());
        assert_eq!(date.raw(), "[2024,7,19]");

        let date: ExpenseDate = serde_json::from_str("1721347200000").unwrap();
        assert!(!date.is_valid());
    }

    #[test]
    fn test_deserialize_null() {
        let date: ExpenseDate = serde_json::from_str("null").unwrap();
        assert!(!date.is_valid());
        assert_eq!(date.raw(), "");
    }
}
