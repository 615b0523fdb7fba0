//! Error types for chart calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

use ziwei_time::CalendarError;

/// Errors from chart construction and index arithmetic.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ChartError {
    /// Modulus for circular index arithmetic was zero or negative.
    InvalidModulus(i32),
    /// Lunar day outside 1..=30.
    InvalidDay(u8),
    /// Hour-branch index outside 0..12.
    InvalidHourIndex(u8),
    /// Month index outside 0..12.
    InvalidMonthIndex(u8),
    /// Palace index outside 0..12.
    InvalidPalaceIndex(u8),
    /// Error from date handling.
    Calendar(CalendarError),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidModulus(m) => write!(f, "invalid modulus: {m} (must be positive)"),
            Self::InvalidDay(d) => write!(f, "invalid lunar day: {d} (1-30)"),
            Self::InvalidHourIndex(h) => write!(f, "invalid hour index: {h} (0-11)"),
            Self::InvalidMonthIndex(m) => write!(f, "invalid month index: {m} (0-11)"),
            Self::InvalidPalaceIndex(i) => write!(f, "invalid palace index: {i} (0-11)"),
            Self::Calendar(e) => write!(f, "calendar error: {e}"),
        }
    }
}

impl Error for ChartError {}

impl From<CalendarError> for ChartError {
    fn from(e: CalendarError) -> Self {
        Self::Calendar(e)
    }
}
