//! The Chinese lunisolar calendar backed by ICU4X.
//!
//! [`ChineseCalendar`] answers every [`LunisolarCalendar`] query from
//! `icu_calendar`'s Chinese calendar (China standard time, astronomical
//! new moons and solar terms). Years are addressed by their related
//! Gregorian year, so lunar year 2020 is the year starting 2020-01-25.
//!
//! ICU numbers months by position in the year (a leap month takes the slot
//! after its namesake) and labels them with month codes such as `M04` and
//! `M04L`. [`LunarMonth`] is recovered from the code.

use icu_calendar::chinese::Chinese;
use icu_calendar::Date;
use tracing::trace;

use crate::calendar::LunisolarCalendar;
use crate::error::CalendarError;
use crate::lunar::{LunarMonth, LunarTime};
use crate::sexagenary::{MAX_YEAR, MIN_YEAR};
use crate::solar_time::SolarTime;

/// Difference between ICU's extended Chinese year and the related
/// Gregorian year.
const EXTENDED_YEAR_OFFSET: i32 = 2637;

/// Default [`LunisolarCalendar`]: the Chinese calendar from `icu_calendar`.
#[derive(Debug, Clone)]
pub struct ChineseCalendar {
    inner: Chinese,
}

impl Default for ChineseCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl ChineseCalendar {
    /// Calendar using ICU's compiled data (precomputed years, astronomical
    /// calculation outside them).
    pub fn new() -> Self {
        Self {
            inner: Chinese::new(),
        }
    }

    fn date(&self, year: i32, ordinal: u8, day: u8) -> Result<Date<Chinese>, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::YearOutOfRange(year));
        }
        Date::try_new_chinese_date_with_calendar(
            year + EXTENDED_YEAR_OFFSET,
            ordinal,
            day,
            self.inner.clone(),
        )
        .map_err(CalendarError::backend)
    }

    /// Position of `month` within `year`, counting a leap month as its own
    /// slot.
    fn ordinal(&self, year: i32, month: LunarMonth) -> Result<u8, CalendarError> {
        match self.leap_month(year)? {
            Some(l) if month.leap && month.number == l => Ok(l + 1),
            Some(l) if !month.leap && month.number > l => Ok(month.number + 1),
            _ if month.leap => Err(CalendarError::InvalidMonth(month.number)),
            _ => Ok(month.number),
        }
    }
}

/// Month number and leap flag from an ICU month code (`M01`..`M12`, with a
/// trailing `L` on leap months).
fn month_of(date: &Date<Chinese>) -> Result<LunarMonth, CalendarError> {
    let month = date.month();
    let code = month.code.0.as_str();
    let (digits, leap) = match code.strip_suffix('L') {
        Some(digits) => (digits, true),
        None => (code, false),
    };
    let number = digits
        .strip_prefix('M')
        .and_then(|d| d.parse::<u8>().ok())
        .ok_or_else(|| CalendarError::Backend(format!("unexpected month code {code}")))?;
    LunarMonth::with_leap(number, leap)
}

fn related_year(date: &Date<Chinese>) -> i32 {
    let year = date.year();
    year.related_iso
        .unwrap_or(year.number - EXTENDED_YEAR_OFFSET)
}

impl LunisolarCalendar for ChineseCalendar {
    fn leap_month(&self, year: i32) -> Result<Option<u8>, CalendarError> {
        let months = self.date(year, 1, 1)?.months_in_year();
        if months <= 12 {
            return Ok(None);
        }
        for ordinal in 2..=months {
            let month = month_of(&self.date(year, ordinal, 1)?)?;
            if month.leap {
                return Ok(Some(month.number));
            }
        }
        Ok(None)
    }

    fn month_days(&self, year: i32, month: LunarMonth) -> Result<u8, CalendarError> {
        let ordinal = self.ordinal(year, month)?;
        Ok(self.date(year, ordinal, 1)?.days_in_month())
    }

    fn to_lunar(&self, solar: &SolarTime) -> Result<LunarTime, CalendarError> {
        let (hour, minute, second) = solar.clock()?;
        let date = solar.iso_date()?.to_calendar(self.inner.clone());
        let day = u8::try_from(date.day_of_month().0).map_err(CalendarError::backend)?;
        let lunar = LunarTime::new(related_year(&date), month_of(&date)?, day, hour, minute, second);
        trace!(%solar, year = lunar.year, month = lunar.month.number, leap = lunar.month.leap, day, "solar to lunar");
        Ok(lunar)
    }

    fn to_solar(&self, lunar: &LunarTime) -> Result<SolarTime, CalendarError> {
        let len = self.month_days(lunar.year, lunar.month)?;
        if lunar.day == 0 || lunar.day > len {
            return Err(CalendarError::InvalidDay(lunar.day.into()));
        }
        let ordinal = self.ordinal(lunar.year, lunar.month)?;
        let iso = self.date(lunar.year, ordinal, lunar.day)?.to_iso();
        Ok(SolarTime::from_iso(
            &iso,
            lunar.hour.into(),
            lunar.minute.into(),
            lunar.second.into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cal() -> ChineseCalendar {
        ChineseCalendar::new()
    }

    #[test]
    fn new_year_2020() {
        let l = cal().to_lunar(&SolarTime::new(2020, 1, 25, 9, 15, 0)).unwrap();
        assert_eq!((l.year, l.month, l.day), (2020, LunarMonth::new(1).unwrap(), 1));
        assert_eq!((l.hour, l.minute), (9, 15));
        let eve = cal().to_lunar(&SolarTime::new(2020, 1, 24, 9, 0, 0)).unwrap();
        assert_eq!((eve.year, eve.month.number, eve.day), (2019, 12, 30));
    }

    #[test]
    fn leap_months() {
        assert_eq!(cal().leap_month(2020).unwrap(), Some(4));
        assert_eq!(cal().leap_month(2021).unwrap(), None);
        assert_eq!(cal().leap_month(2023).unwrap(), Some(2));
    }

    #[test]
    fn leap_fourth_month_of_2020() {
        // Leap 4 of 2020 began on 2020-05-23.
        let l = cal().to_lunar(&SolarTime::new(2020, 6, 11, 8, 0, 0)).unwrap();
        assert_eq!(l.month, LunarMonth::leap(4).unwrap());
        assert_eq!(l.day, 20);
        assert_eq!(cal().month_days(2020, LunarMonth::leap(4).unwrap()).unwrap(), 29);
    }

    #[test]
    fn year_2000_mid_autumn() {
        let solar = cal()
            .to_solar(&LunarTime::new(2000, LunarMonth::new(8).unwrap(), 15, 20, 0, 0))
            .unwrap();
        assert_eq!(solar, SolarTime::new(2000, 9, 12, 20, 0, 0));
    }

    #[test]
    fn roundtrip_through_leap_month() {
        let lunar = LunarTime::new(2020, LunarMonth::leap(4).unwrap(), 3, 6, 30, 0);
        let solar = cal().to_solar(&lunar).unwrap();
        assert_eq!(solar, SolarTime::new(2020, 5, 25, 6, 30, 0));
        assert_eq!(cal().to_lunar(&solar).unwrap(), lunar);
    }

    #[test]
    fn rejects_missing_dates() {
        let c = cal();
        let no_leap = LunarTime::new(2021, LunarMonth::leap(4).unwrap(), 3, 0, 0, 0);
        assert_eq!(c.to_solar(&no_leap), Err(CalendarError::InvalidMonth(4)));
        let short = LunarTime::new(2020, LunarMonth::leap(4).unwrap(), 30, 0, 0, 0);
        assert_eq!(c.to_solar(&short), Err(CalendarError::InvalidDay(30)));
        assert_eq!(c.leap_month(0), Err(CalendarError::YearOutOfRange(0)));
    }
}
