//! Civil (Gregorian) date and clock time.
//!
//! Provides `SolarTime`, the solar birth instant handed to a
//! [`LunisolarCalendar`](crate::LunisolarCalendar). Local civil time is used
//! as-is; true-solar-time correction by longitude is not applied.

use std::str::FromStr;

use calendrical_calculations::iso::fixed_from_iso;
use icu_calendar::{Date, Iso};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Gregorian calendar date with minute precision (seconds kept for display).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolarTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl SolarTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Check month/day/time fields against the Gregorian calendar.
    pub fn validate(&self) -> Result<(), CalendarError> {
        self.iso_date()?;
        if self.hour > 23 {
            return Err(CalendarError::InvalidHour(self.hour));
        }
        if self.minute > 59 || self.second > 59 {
            return Err(CalendarError::Parse(format!(
                "time {:02}:{:02}:{:02} out of range",
                self.hour, self.minute, self.second
            )));
        }
        Ok(())
    }

    /// The civil date as an ISO calendar date (time of day dropped).
    pub fn iso_date(&self) -> Result<Date<Iso>, CalendarError> {
        let (month, day) = self.month_day()?;
        Date::try_new_iso_date(self.year, month, day).map_err(CalendarError::backend)
    }

    /// Month and day narrowed after checking them against the calendar.
    fn month_day(&self) -> Result<(u8, u8), CalendarError> {
        let month = u8::try_from(self.month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| CalendarError::Parse(format!("month {} out of range", self.month)))?;
        let first = Date::try_new_iso_date(self.year, month, 1).map_err(CalendarError::backend)?;
        let day = u8::try_from(self.day)
            .ok()
            .filter(|d| (1..=first.days_in_month()).contains(d))
            .ok_or(CalendarError::InvalidDay(self.day))?;
        Ok((month, day))
    }

    /// Hour, minute and second narrowed for a lunar time.
    pub fn clock(&self) -> Result<(u8, u8, u8), CalendarError> {
        self.validate()?;
        let narrow = |v: u32| {
            u8::try_from(v).map_err(|_| CalendarError::Parse(format!("clock field {v} out of range")))
        };
        Ok((narrow(self.hour)?, narrow(self.minute)?, narrow(self.second)?))
    }

    /// Solar time on an ISO date with the given clock fields.
    pub fn from_iso(date: &Date<Iso>, hour: u32, minute: u32, second: u32) -> Self {
        Self::new(
            date.year().number,
            date.month().ordinal,
            date.day_of_month().0,
            hour,
            minute,
            second,
        )
    }

    /// Fixed day number (Rata Die, 0001-01-01 = 1) of the civil date.
    pub fn rata_die(&self) -> Result<i64, CalendarError> {
        let (month, day) = self.month_day()?;
        Ok(fixed_from_iso(self.year, month, day).to_i64_date())
    }
}

impl std::fmt::Display for SolarTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM` and
/// `YYYY-MM-DDTHH:MM:SS` (an optional trailing `Z` is ignored).
impl FromStr for SolarTime {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('Z');
        let (date, time) = match s.split_once(['T', ' ']) {
            Some((d, t)) => (d, Some(t)),
            None => (s, None),
        };

        let date_parts: Vec<&str> = date.split('-').collect();
        if date_parts.len() != 3 {
            return Err(CalendarError::Parse(format!("expected YYYY-MM-DD, got '{date}'")));
        }
        let year: i32 = date_parts[0].parse()?;
        let month: u32 = date_parts[1].parse()?;
        let day: u32 = date_parts[2].parse()?;

        let (hour, minute, second) = match time {
            None => (0, 0, 0),
            Some(t) => {
                let parts: Vec<&str> = t.split(':').collect();
                match parts.as_slice() {
                    [h, m] => (h.parse()?, m.parse()?, 0),
                    [h, m, s] => (h.parse()?, m.parse()?, s.parse()?),
                    _ => {
                        return Err(CalendarError::Parse(format!("expected HH:MM[:SS], got '{t}'")));
                    }
                }
            }
        };

        let st = Self::new(year, month, day, hour, minute, second);
        st.validate()?;
        Ok(st)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_constructor() {
        let t = SolarTime::new(2024, 3, 20, 12, 30, 45);
        assert_eq!(t.year, 2024);
        assert_eq!(t.month, 3);
        assert_eq!(t.day, 20);
        assert_eq!(t.hour, 12);
        assert_eq!(t.minute, 30);
        assert_eq!(t.second, 45);
    }

    #[test]
    fn display_pads_fields() {
        let t = SolarTime::new(2023, 5, 7, 4, 3, 0);
        assert_eq!(t.to_string(), "2023-05-07 04:03");
    }

    #[test]
    fn parse_iso_like() {
        let t: SolarTime = "1998-02-19T13:45:10Z".parse().unwrap();
        assert_eq!(t, SolarTime::new(1998, 2, 19, 13, 45, 10));
        let t: SolarTime = "1998-02-19 07:05".parse().unwrap();
        assert_eq!(t, SolarTime::new(1998, 2, 19, 7, 5, 0));
        let t: SolarTime = "1998-02-19".parse().unwrap();
        assert_eq!(t.hour, 0);
    }

    #[test]
    fn parse_rejects_bad_day() {
        let err = "2023-02-29T10:00".parse::<SolarTime>().unwrap_err();
        assert_eq!(err, CalendarError::InvalidDay(29));
    }

    #[test]
    fn wide_fields_keep_their_value_in_errors() {
        let t = SolarTime::new(2023, 1, 300, 10, 0, 0);
        assert_eq!(t.validate(), Err(CalendarError::InvalidDay(300)));
        let t = SolarTime::new(2023, 1, 1, 280, 0, 0);
        assert_eq!(t.validate(), Err(CalendarError::InvalidHour(280)));
        assert!(SolarTime::new(2023, 269, 1, 0, 0, 0).validate().is_err());
    }

    #[test]
    fn rata_die_of_known_dates() {
        assert_eq!(SolarTime::new(1, 1, 1, 0, 0, 0).rata_die().unwrap(), 1);
        assert_eq!(SolarTime::new(2000, 1, 1, 0, 0, 0).rata_die().unwrap(), 730_120);
        let leap = SolarTime::new(2000, 2, 29, 0, 0, 0).rata_die().unwrap();
        assert_eq!(SolarTime::new(2000, 3, 1, 0, 0, 0).rata_die().unwrap(), leap + 1);
    }

    #[test]
    fn iso_roundtrip_keeps_clock() {
        let t = SolarTime::new(2024, 2, 29, 7, 15, 3);
        let iso = t.iso_date().unwrap();
        assert_eq!(SolarTime::from_iso(&iso, 7, 15, 3), t);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("2023/02/01".parse::<SolarTime>().is_err());
        assert!("2023-02-01T25:00".parse::<SolarTime>().is_err());
        assert!("2023-02-01Tab:00".parse::<SolarTime>().is_err());
    }
}
