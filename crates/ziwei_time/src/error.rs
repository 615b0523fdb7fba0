//! Error types for lunisolar date handling.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar lookups, date validation, or date parsing.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CalendarError {
    /// Calendar year outside the supported range [1, 9999].
    YearOutOfRange(i32),
    /// Month number outside 1..=12, or a leap flag the year does not have.
    InvalidMonth(u8),
    /// Day of month outside the month's length.
    InvalidDay(u32),
    /// Clock hour outside 0..=23.
    InvalidHour(u32),
    /// The calendar has no data for the requested date.
    Unsupported(&'static str),
    /// A date or table string could not be parsed.
    Parse(String),
    /// The calendar backend rejected a date.
    Backend(String),
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearOutOfRange(y) => write!(f, "year {y} outside supported range 1..=9999"),
            Self::InvalidMonth(m) => write!(f, "invalid lunar month: {m}"),
            Self::InvalidDay(d) => write!(f, "invalid day of month: {d}"),
            Self::InvalidHour(h) => write!(f, "invalid hour: {h} (0-23)"),
            Self::Unsupported(msg) => write!(f, "calendar cannot answer: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Backend(msg) => write!(f, "calendar backend: {msg}"),
        }
    }
}

impl Error for CalendarError {}

impl CalendarError {
    /// Wrap an error reported by the calendar backend.
    pub(crate) fn backend(e: impl Display) -> Self {
        Self::Backend(e.to_string())
    }
}

impl From<std::num::ParseIntError> for CalendarError {
    fn from(e: std::num::ParseIntError) -> Self {
        Self::Parse(e.to_string())
    }
}
