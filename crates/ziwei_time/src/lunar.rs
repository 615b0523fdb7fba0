//! Lunisolar date types.

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// A lunar month number (1..=12) with its leap flag.
///
/// A leap month carries the number of the month it follows: leap month 4
/// sits between month 4 and month 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarMonth {
    pub number: u8,
    pub leap: bool,
}

impl LunarMonth {
    /// A regular (non-leap) month. Fails outside 1..=12.
    pub fn new(number: u8) -> Result<Self, CalendarError> {
        Self::with_leap(number, false)
    }

    /// A leap month following month `number`. Fails outside 1..=12.
    pub fn leap(number: u8) -> Result<Self, CalendarError> {
        Self::with_leap(number, true)
    }

    pub fn with_leap(number: u8, leap: bool) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&number) {
            return Err(CalendarError::InvalidMonth(number));
        }
        Ok(Self { number, leap })
    }

    /// 0-based month index (month 1 = 0).
    pub const fn index(self) -> u8 {
        self.number - 1
    }
}

/// A lunisolar instant: lunar year, month, day and the civil clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LunarTime {
    pub year: i32,
    pub month: LunarMonth,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl LunarTime {
    pub fn new(year: i32, month: LunarMonth, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Same clock time on another lunar date.
    pub fn with_date(self, year: i32, month: LunarMonth, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            ..self
        }
    }

    /// Whether the clock time falls in the late Zi slot (23:00-23:59).
    pub const fn is_late_zi(&self) -> bool {
        self.hour == 23
    }
}

/// Clock time `(hour, minute, second)` in the middle of an hour-branch slot.
///
/// Lunar date strings carry only the hour-branch index; the calendar needs a
/// concrete clock time, so the slot's even hour plus thirty minutes is used.
/// Index 12 is the late Zi slot and maps to 23:30.
pub const fn hour_from_index(hour_index: u8) -> (u8, u8, u8) {
    match hour_index {
        12 => (23, 30, 0),
        i => ((i % 12) * 2, 30, 0),
    }
}
