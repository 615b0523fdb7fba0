//! The lunisolar calendar collaborator and month/day navigation on top of it.
//!
//! Solar↔lunar conversion lives behind [`LunisolarCalendar`]. The default
//! implementation is [`ChineseCalendar`](crate::ChineseCalendar); a
//! [`TableCalendar`](crate::TableCalendar) stands in where fixed data is
//! wanted. Everything else only asks for month lengths, leap months and the
//! two conversions.

use crate::error::CalendarError;
use crate::lunar::{LunarMonth, LunarTime};
use crate::solar_time::SolarTime;

/// Source of lunisolar calendar facts.
pub trait LunisolarCalendar {
    /// Leap month number of a lunar year, if the year has one.
    fn leap_month(&self, year: i32) -> Result<Option<u8>, CalendarError>;

    /// Length (29 or 30) of a lunar month.
    fn month_days(&self, year: i32, month: LunarMonth) -> Result<u8, CalendarError>;

    /// Lunar date of a solar instant. The clock time carries over unchanged.
    fn to_lunar(&self, solar: &SolarTime) -> Result<LunarTime, CalendarError>;

    /// Solar date of a lunar instant. The clock time carries over unchanged.
    fn to_solar(&self, lunar: &LunarTime) -> Result<SolarTime, CalendarError>;
}

impl<C: LunisolarCalendar + ?Sized> LunisolarCalendar for &C {
    fn leap_month(&self, year: i32) -> Result<Option<u8>, CalendarError> {
        (**self).leap_month(year)
    }

    fn month_days(&self, year: i32, month: LunarMonth) -> Result<u8, CalendarError> {
        (**self).month_days(year, month)
    }

    fn to_lunar(&self, solar: &SolarTime) -> Result<LunarTime, CalendarError> {
        (**self).to_lunar(solar)
    }

    fn to_solar(&self, lunar: &LunarTime) -> Result<SolarTime, CalendarError> {
        (**self).to_solar(lunar)
    }
}

/// Check that a lunar date exists in the calendar.
pub fn validate_lunar<C: LunisolarCalendar + ?Sized>(
    cal: &C,
    date: &LunarTime,
) -> Result<(), CalendarError> {
    if date.month.leap && cal.leap_month(date.year)? != Some(date.month.number) {
        return Err(CalendarError::InvalidMonth(date.month.number));
    }
    let len = cal.month_days(date.year, date.month)?;
    if date.day == 0 || date.day > len {
        return Err(CalendarError::InvalidDay(date.day.into()));
    }
    if date.hour > 23 {
        return Err(CalendarError::InvalidHour(date.hour.into()));
    }
    Ok(())
}

/// The month after `(year, month)`, stepping through a leap month when the
/// year has one.
pub fn next_month<C: LunisolarCalendar + ?Sized>(
    cal: &C,
    year: i32,
    month: LunarMonth,
) -> Result<(i32, LunarMonth), CalendarError> {
    if !month.leap && cal.leap_month(year)? == Some(month.number) {
        return Ok((year, LunarMonth::leap(month.number)?));
    }
    if month.number == 12 {
        Ok((year + 1, LunarMonth::new(1)?))
    } else {
        Ok((year, LunarMonth::new(month.number + 1)?))
    }
}

/// The nearest non-leap month before a leap month (same number).
pub fn month_before_leap(year: i32, leap: LunarMonth) -> Result<(i32, LunarMonth), CalendarError> {
    Ok((year, LunarMonth::new(leap.number)?))
}

/// The nearest non-leap month after a leap month.
pub fn month_after_leap(year: i32, leap: LunarMonth) -> Result<(i32, LunarMonth), CalendarError> {
    if leap.number == 12 {
        Ok((year + 1, LunarMonth::new(1)?))
    } else {
        Ok((year, LunarMonth::new(leap.number + 1)?))
    }
}

/// The following lunar day, keeping the clock time.
pub fn next_day<C: LunisolarCalendar + ?Sized>(
    cal: &C,
    date: &LunarTime,
) -> Result<LunarTime, CalendarError> {
    let len = cal.month_days(date.year, date.month)?;
    if date.day < len {
        return Ok(date.with_date(date.year, date.month, date.day + 1));
    }
    let (year, month) = next_month(cal, date.year, date.month)?;
    Ok(date.with_date(year, month, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{LunarYearTable, TableCalendar};

    fn calendar() -> TableCalendar {
        // Synthetic year with a leap 4th month.
        let mut cal = TableCalendar::new();
        cal.try_insert(LunarYearTable {
            year: 2020,
            new_year: SolarTime::new(2020, 1, 25, 0, 0, 0),
            leap_month: Some(4),
            month_days: vec![29, 30, 30, 30, 29, 30, 29, 30, 29, 30, 30, 29, 29],
        })
        .unwrap();
        cal.try_insert(LunarYearTable {
            year: 2021,
            new_year: SolarTime::new(2021, 2, 12, 0, 0, 0),
            leap_month: None,
            month_days: vec![29, 30, 30, 29, 30, 29, 30, 29, 30, 29, 30, 30],
        })
        .unwrap();
        cal
    }

    #[test]
    fn next_month_enters_leap() {
        let cal = calendar();
        let (y, m) = next_month(&cal, 2020, LunarMonth::new(4).unwrap()).unwrap();
        assert_eq!((y, m), (2020, LunarMonth::leap(4).unwrap()));
        let (y, m) = next_month(&cal, 2020, m).unwrap();
        assert_eq!((y, m), (2020, LunarMonth::new(5).unwrap()));
    }

    #[test]
    fn next_month_crosses_year() {
        let cal = calendar();
        let (y, m) = next_month(&cal, 2020, LunarMonth::new(12).unwrap()).unwrap();
        assert_eq!((y, m), (2021, LunarMonth::new(1).unwrap()));
    }

    #[test]
    fn next_day_rolls_month() {
        let cal = calendar();
        // Month 1 of 2020 has 29 days.
        let d = LunarTime::new(2020, LunarMonth::new(1).unwrap(), 29, 23, 10, 0);
        let n = next_day(&cal, &d).unwrap();
        assert_eq!((n.year, n.month.number, n.day), (2020, 2, 1));
        assert_eq!(n.hour, 23);
    }

    #[test]
    fn validate_rejects_missing_leap() {
        let cal = calendar();
        let d = LunarTime::new(2021, LunarMonth::leap(4).unwrap(), 3, 10, 0, 0);
        assert_eq!(validate_lunar(&cal, &d), Err(CalendarError::InvalidMonth(4)));
        let d = LunarTime::new(2020, LunarMonth::new(1).unwrap(), 30, 10, 0, 0);
        assert_eq!(validate_lunar(&cal, &d), Err(CalendarError::InvalidDay(30)));
    }

    #[test]
    fn neighbours_of_leap_twelve() {
        let leap = LunarMonth::leap(12).unwrap();
        assert_eq!(
            month_after_leap(2033, leap).unwrap(),
            (2034, LunarMonth::new(1).unwrap())
        );
        assert_eq!(
            month_before_leap(2033, leap).unwrap(),
            (2033, LunarMonth::new(12).unwrap())
        );
    }
}
