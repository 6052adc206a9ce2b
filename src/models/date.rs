//! Calendar-day value type and the lenient date normalizer.
//!
//! Every date that enters the engine (session dates, member exclusions)
//! is normalised once into a [`CalendarDate`]. All comparisons downstream
//! operate on this type only; no string re-parsing happens after the
//! input boundary.
//!
//! # Accepted Inputs
//!
//! | Shape | Example | Notes |
//! |-------|---------|-------|
//! | ISO date | `2025-04-05`, `2025-4-5` | one- or two-digit month/day |
//! | ISO date-time | `2025-04-05T12:00:00Z` | time and offset ignored |
//! | US slash | `04/05/2025`, `4/5/2025` | month first |
//! | Fallback | `Sat, 05 Apr 2025 09:00:00 +0000`, `April 5, 2025` | RFC 3339/2822 and fixed formats |
//!
//! Inputs matching none of these are rejected with [`DateParseError`].
//! Callers that compare raw strings use [`CalendarDate::is_same_day`],
//! which treats an unparseable side as "not the same day".

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Formats tried after the ISO and US shapes fail.
const FALLBACK_FORMATS: &[&str] = &["%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%Y%m%d"];

/// Reasons a raw date could not be normalised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// The input was empty or whitespace.
    #[error("empty date string")]
    Empty,
    /// The input had a recognised shape but named a day that does not exist.
    #[error("'{0}' is not a valid calendar date")]
    OutOfRange(String),
    /// The input matched no known date shape.
    #[error("unrecognized date format: '{0}'")]
    Unrecognized(String),
}

/// A year/month/day triple with no time-of-day or timezone.
///
/// Ordering is chronological. Serialises as ISO `YYYY-MM-DD` and
/// deserialises through [`CalendarDate::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from its components.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateParseError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| DateParseError::OutOfRange(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Normalises a raw date string.
    ///
    /// Tries the ISO shape, then `M/D/YYYY`, then the generic fallbacks.
    pub fn parse(input: &str) -> Result<Self, DateParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DateParseError::Empty);
        }

        if let Some((y, m, d)) = match_iso(trimmed).or_else(|| match_us(trimmed)) {
            return NaiveDate::from_ymd_opt(y, m, d)
                .map(Self)
                .ok_or_else(|| DateParseError::OutOfRange(trimmed.to_string()));
        }

        parse_fallback(trimmed)
            .map(Self)
            .ok_or_else(|| DateParseError::Unrecognized(trimmed.to_string()))
    }

    /// Converts a Unix timestamp in milliseconds (UTC) to its calendar day.
    pub fn from_timestamp_millis(ms: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(ms).map(|dt| Self(dt.date_naive()))
    }

    /// Whether two raw date strings name the same calendar day.
    ///
    /// Returns `false` if either side fails to parse.
    pub fn is_same_day(a: &str, b: &str) -> bool {
        match (Self::parse(a), Self::parse(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Calendar year.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month (1-31).
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The underlying chrono date.
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Formats as `MM/DD/YYYY`.
    pub fn format_us(&self) -> String {
        format!("{:02}/{:02}/{:04}", self.month(), self.day(), self.year())
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for CalendarDate {
    /// Takes the calendar day in the timestamp's own offset.
    fn from(dt: DateTime<Tz>) -> Self {
        Self(dt.date_naive())
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Matches `YYYY-M-D` with an optional `T`/space-separated time suffix.
fn match_iso(s: &str) -> Option<(i32, u32, u32)> {
    let date_part = s.split(['T', ' ']).next()?;
    let mut parts = date_part.split('-');
    let year = digits(parts.next()?, 4, 4)?;
    let month = digits(parts.next()?, 1, 2)?;
    let day = digits(parts.next()?, 1, 2)?;
    if parts.next().is_some() {
        return None;
    }
    Some((year as i32, month, day))
}

/// Matches `M/D/YYYY`.
fn match_us(s: &str) -> Option<(i32, u32, u32)> {
    let mut parts = s.split('/');
    let month = digits(parts.next()?, 1, 2)?;
    let day = digits(parts.next()?, 1, 2)?;
    let year = digits(parts.next()?, 4, 4)?;
    if parts.next().is_some() {
        return None;
    }
    Some((year as i32, month, day))
}

fn parse_fallback(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    FALLBACK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parses an all-digit field of `min..=max` characters.
fn digits(field: &str, min: usize, max: usize) -> Option<u32> {
    if field.len() < min || field.len() > max || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
