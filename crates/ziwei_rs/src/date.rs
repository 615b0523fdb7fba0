//! Lunar date strings of the form `year-month-day-hourIndex`.
//!
//! The month may carry an `L` suffix for a leap month (`2020-4L-3-5`), and
//! hour index 12 names the late Zi slot (23:00-23:59).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use ziwei_time::{CalendarError, LATE_ZI_INDEX, LunarMonth, LunarTime, hour_from_index};

use crate::error::ZiweiError;

/// A lunar birth date as typed by a user: month (with leap flag), day of
/// month and hour-branch index (0 = Zi .. 11 = Hai, 12 = late Zi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LunarDate {
    pub year: i32,
    pub month: LunarMonth,
    pub day: u8,
    pub hour_index: u8,
}

impl LunarDate {
    pub fn new(year: i32, month: LunarMonth, day: u8, hour_index: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour_index,
        }
    }

    /// Lunar instant in the middle of the hour slot. The calendar still has
    /// to confirm that the day exists.
    pub fn to_lunar_time(&self) -> Result<LunarTime, CalendarError> {
        if self.hour_index > LATE_ZI_INDEX {
            return Err(CalendarError::InvalidHour(self.hour_index.into()));
        }
        if !(1..=30).contains(&self.day) {
            return Err(CalendarError::InvalidDay(self.day.into()));
        }
        let (hour, minute, second) = hour_from_index(self.hour_index);
        Ok(LunarTime::new(self.year, self.month, self.day, hour, minute, second))
    }
}

impl Display for LunarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let leap = if self.month.leap { "L" } else { "" };
        write!(
            f,
            "{}-{}{leap}-{}-{}",
            self.year, self.month.number, self.day, self.hour_index
        )
    }
}

impl FromStr for LunarDate {
    type Err = ZiweiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        let [year, month, day, hour] = parts[..] else {
            return Err(ZiweiError::Parse(format!(
                "expected year-month-day-hourIndex, got '{s}'"
            )));
        };
        let field = |name: &str, text: &str| {
            text.trim()
                .parse::<u32>()
                .map_err(|e| ZiweiError::Parse(format!("{name} '{text}': {e}")))
        };
        let narrow = |name: &str, v: u32| {
            u8::try_from(v).map_err(|_| ZiweiError::Parse(format!("{name} {v} out of range")))
        };
        let year = field("year", year)?;
        let month = month.trim();
        let (number, leap) = match month.strip_suffix(['L', 'l']) {
            Some(number) => (number, true),
            None => (month, false),
        };
        let number = narrow("month", field("month", number)?)?;
        Ok(Self {
            year: i32::try_from(year)
                .map_err(|_| ZiweiError::Parse(format!("year {year} out of range")))?,
            month: LunarMonth::with_leap(number, leap)?,
            day: narrow("day", field("day", day)?)?,
            hour_index: narrow("hour index", field("hour index", hour)?)?,
        })
    }
}
