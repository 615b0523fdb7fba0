//! Birth-date normalization: late Zi hour and leap-month resolution.
//!
//! A lunar birth instant is turned into the indices the chart needs: year
//! stem/branch, 0-based month index, day of month and hour-branch index.
//! Two ambiguities are resolved on the way, in this order:
//!
//! 1. Late Zi hour: under [`DayDivision::Normal`] a birth at 23:xx belongs
//!    to the next lunar day.
//! 2. Leap month: a leap month is folded onto its regular neighbour
//!    according to [`MonthDivision`].

use serde::Serialize;
use tracing::debug;

use crate::calendar::{
    LunisolarCalendar, month_after_leap, month_before_leap, next_day, validate_lunar,
};
use crate::config::{ChartConfig, DayDivision, MonthDivision};
use crate::error::CalendarError;
use crate::lunar::{LunarMonth, LunarTime, hour_from_index};
use crate::sexagenary::{Branch, Stem, sexagenary_from_year};

/// Marker index for the late half of the Zi slot before it is folded.
pub const LATE_ZI_INDEX: u8 = 12;

/// Hour-branch index of a clock hour.
///
/// 0 is early Zi, 23 is late Zi ([`LATE_ZI_INDEX`]), every other hour maps
/// to `(hour + 1) / 2`.
pub fn hour_index(hour: u8) -> Result<u8, CalendarError> {
    match hour {
        0 => Ok(0),
        23 => Ok(LATE_ZI_INDEX),
        1..=22 => Ok((hour + 1) >> 1),
        _ => Err(CalendarError::InvalidHour(hour.into())),
    }
}

/// Fold the late Zi marker onto Zi; other indices pass through.
pub const fn fold_hour_index(index: u8) -> u8 {
    index % 12
}

/// A birth date reduced to chart indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizedDate {
    /// Lunar year after corrections (a leap 12th month may roll it over).
    pub year: i32,
    pub stem: Stem,
    pub branch: Branch,
    /// 0-based regular month index.
    pub month_index: u8,
    pub day: u8,
    /// Hour-branch index in 0..12.
    pub hour_index: u8,
    /// The corrected lunar date.
    pub lunar: LunarTime,
}

impl NormalizedDate {
    /// Indices straight from a lunar year/month/day/hour-index, with no
    /// calendar corrections.
    pub fn from_indices(year: i32, month: u8, day: u8, hour_index: u8) -> Result<Self, CalendarError> {
        let sexagenary = sexagenary_from_year(year)?;
        let lunar_month = LunarMonth::new(month)?;
        if !(1..=30).contains(&day) {
            return Err(CalendarError::InvalidDay(day.into()));
        }
        if hour_index > 11 {
            return Err(CalendarError::InvalidHour(hour_index.into()));
        }
        let (hour, minute, second) = hour_from_index(hour_index);
        Ok(Self {
            year,
            stem: sexagenary.stem,
            branch: sexagenary.branch,
            month_index: lunar_month.index(),
            day,
            hour_index,
            lunar: LunarTime::new(year, lunar_month, day, hour, minute, second),
        })
    }
}

/// Apply the late Zi rule.
pub fn fix_late_zi<C: LunisolarCalendar + ?Sized>(
    cal: &C,
    date: &LunarTime,
    division: DayDivision,
) -> Result<LunarTime, CalendarError> {
    if division == DayDivision::Normal && date.is_late_zi() {
        let next = next_day(cal, date)?;
        debug!(
            from_month = date.month.number,
            from_day = date.day,
            to_month = next.month.number,
            to_day = next.day,
            "late zi hour moved to next day"
        );
        return Ok(next);
    }
    Ok(*date)
}

/// Fold a leap month onto a regular month, keeping the day of month
/// (clamped to the target month's length).
pub fn fix_leap_month<C: LunisolarCalendar + ?Sized>(
    cal: &C,
    date: &LunarTime,
    division: MonthDivision,
) -> Result<LunarTime, CalendarError> {
    if !date.month.leap {
        return Ok(*date);
    }
    let prior = match division {
        MonthDivision::Last => true,
        MonthDivision::Next => false,
        MonthDivision::Normal => date.day < 15 || (date.day == 15 && !date.is_late_zi()),
    };
    let (year, month) = if prior {
        month_before_leap(date.year, date.month)?
    } else {
        month_after_leap(date.year, date.month)?
    };
    let day = date.day.min(cal.month_days(year, month)?);
    debug!(
        leap_month = date.month.number,
        day = date.day,
        to_year = year,
        to_month = month.number,
        ?division,
        "leap month folded"
    );
    Ok(date.with_date(year, month, day))
}

/// Normalize a lunar birth instant under `config`.
pub fn normalize_birth<C: LunisolarCalendar + ?Sized>(
    cal: &C,
    date: &LunarTime,
    config: &ChartConfig,
) -> Result<NormalizedDate, CalendarError> {
    validate_lunar(cal, date)?;
    let shifted = fix_late_zi(cal, date, config.day_division)?;
    let lunar = fix_leap_month(cal, &shifted, config.month_division)?;
    let sexagenary = sexagenary_from_year(lunar.year)?;
    let hour = fold_hour_index(hour_index(lunar.hour)?);
    Ok(NormalizedDate {
        year: lunar.year,
        stem: sexagenary.stem,
        branch: sexagenary.branch,
        month_index: lunar.month.index(),
        day: lunar.day,
        hour_index: hour,
        lunar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableCalendar;

    const TABLE: &str = "\
2020 2020-01-25 4 29,30,30,30,29,30,29,30,29,30,30,29,29
2021 2021-02-12 0 29,30,30,29,30,29,30,29,30,29,30,30
2033 2033-01-31 12 30,29,30,29,30,29,30,29,30,29,30,29,30
2034 2034-02-19 0 29,30,29,30,29,30,29,30,29,30,29,30
";

    fn cal() -> TableCalendar {
        TABLE.parse().unwrap()
    }

    fn lunar(year: i32, month: LunarMonth, day: u8, hour: u8) -> LunarTime {
        LunarTime::new(year, month, day, hour, 0, 0)
    }

    #[test]
    fn hour_index_boundaries() {
        assert_eq!(hour_index(0).unwrap(), 0);
        assert_eq!(hour_index(1).unwrap(), 1);
        assert_eq!(hour_index(2).unwrap(), 1);
        // 10:xx sits in the Si slot (09:00~10:59).
        assert_eq!(hour_index(10).unwrap(), 5);
        assert_eq!(hour_index(22).unwrap(), 11);
        assert_eq!(hour_index(23).unwrap(), LATE_ZI_INDEX);
        assert!(hour_index(24).is_err());
        assert_eq!(fold_hour_index(LATE_ZI_INDEX), 0);
    }

    #[test]
    fn late_zi_moves_to_next_day() {
        let d = lunar(2021, LunarMonth::new(3).unwrap(), 5, 23);
        let n = normalize_birth(&cal(), &d, &ChartConfig::default()).unwrap();
        assert_eq!((n.month_index, n.day, n.hour_index), (2, 6, 0));
    }

    #[test]
    fn current_day_division_keeps_date() {
        let d = lunar(2021, LunarMonth::new(3).unwrap(), 5, 23);
        let config = ChartConfig {
            day_division: DayDivision::Current,
            ..ChartConfig::default()
        };
        let n = normalize_birth(&cal(), &d, &config).unwrap();
        assert_eq!((n.month_index, n.day, n.hour_index), (2, 5, 0));
    }

    #[test]
    fn late_zi_on_year_end_rolls_year() {
        // 2020 month 12 has 29 days.
        let d = lunar(2020, LunarMonth::new(12).unwrap(), 29, 23);
        let n = normalize_birth(&cal(), &d, &ChartConfig::default()).unwrap();
        assert_eq!((n.year, n.month_index, n.day), (2021, 0, 1));
        assert_eq!((n.stem, n.branch), (Stem::Xin, Branch::Chou));
    }

    #[test]
    fn leap_month_split_at_fifteen() {
        let c = cal();
        let config = ChartConfig::default();
        let leap4 = LunarMonth::leap(4).unwrap();
        let n = normalize_birth(&c, &lunar(2020, leap4, 14, 10), &config).unwrap();
        assert_eq!(n.month_index, 3);
        let n = normalize_birth(&c, &lunar(2020, leap4, 15, 10), &config).unwrap();
        assert_eq!(n.month_index, 3);
        let n = normalize_birth(&c, &lunar(2020, leap4, 16, 10), &config).unwrap();
        assert_eq!(n.month_index, 4);
    }

    #[test]
    fn leap_fifteen_late_zi_goes_forward() {
        // With the late Zi shift disabled, day 15 at 23:00 still counts as
        // the second half.
        let config = ChartConfig {
            day_division: DayDivision::Current,
            ..ChartConfig::default()
        };
        let d = lunar(2020, LunarMonth::leap(4).unwrap(), 15, 23);
        let n = normalize_birth(&cal(), &d, &config).unwrap();
        assert_eq!((n.month_index, n.day), (4, 15));
    }

    #[test]
    fn leap_policies_last_and_next() {
        let c = cal();
        let d = lunar(2020, LunarMonth::leap(4).unwrap(), 3, 8);
        let last = ChartConfig {
            month_division: MonthDivision::Last,
            ..ChartConfig::default()
        };
        let next = ChartConfig {
            month_division: MonthDivision::Next,
            ..ChartConfig::default()
        };
        assert_eq!(normalize_birth(&c, &d, &last).unwrap().month_index, 3);
        assert_eq!(normalize_birth(&c, &d, &next).unwrap().month_index, 4);
    }

    #[test]
    fn leap_twelve_next_crosses_year() {
        let d = lunar(2033, LunarMonth::leap(12).unwrap(), 20, 8);
        let n = normalize_birth(&cal(), &d, &ChartConfig::default()).unwrap();
        assert_eq!((n.year, n.month_index, n.day), (2034, 0, 20));
        assert_eq!(n.lunar.month, LunarMonth::new(1).unwrap());
    }

    #[test]
    fn leap_day_thirty_clamped() {
        // Leap 12 of 2033 has 30 days, 2034 month 1 only 29.
        let d = lunar(2033, LunarMonth::leap(12).unwrap(), 30, 8);
        let n = normalize_birth(&cal(), &d, &ChartConfig::default()).unwrap();
        assert_eq!((n.year, n.month_index, n.day), (2034, 0, 29));
    }

    #[test]
    fn rejects_dates_missing_from_calendar() {
        let d = lunar(2021, LunarMonth::leap(4).unwrap(), 3, 8);
        assert_eq!(
            normalize_birth(&cal(), &d, &ChartConfig::default()),
            Err(CalendarError::InvalidMonth(4))
        );
    }

    #[test]
    fn from_indices_validates() {
        let n = NormalizedDate::from_indices(2000, 8, 16, 2).unwrap();
        assert_eq!((n.stem, n.branch), (Stem::Geng, Branch::Chen));
        assert_eq!((n.month_index, n.day, n.hour_index), (7, 16, 2));
        assert_eq!(n.lunar.hour, 4);
        assert!(NormalizedDate::from_indices(2000, 13, 1, 0).is_err());
        assert!(NormalizedDate::from_indices(2000, 1, 31, 0).is_err());
        assert!(NormalizedDate::from_indices(2000, 1, 1, 12).is_err());
        assert!(NormalizedDate::from_indices(0, 1, 1, 0).is_err());
    }
}
