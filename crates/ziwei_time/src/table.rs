//! Table-driven lunisolar calendar.
//!
//! Each lunar year is described by the solar date of its first day, its
//! leap month (if any) and the lengths of its 12 or 13 months in order.
//! Useful for pinning a few years in tests or for trying out an alternative
//! reckoning; charts use [`ChineseCalendar`](crate::ChineseCalendar) unless
//! told otherwise. Tables load from text:
//!
//! ```text
//! # year  new-year    leap  month lengths (leap month in sequence)
//! 2020    2020-01-25  4     29,30,30,30,29,30,29,30,29,30,30,29,29
//! 2021    2021-02-12  0     29,30,30,29,30,29,30,29,30,29,30,30
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use icu_calendar::DateDuration;

use crate::calendar::LunisolarCalendar;
use crate::error::CalendarError;
use crate::lunar::{LunarMonth, LunarTime};
use crate::solar_time::SolarTime;

/// One lunar year of a [`TableCalendar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LunarYearTable {
    pub year: i32,
    /// Solar date of day 1 of month 1 (time fields ignored).
    pub new_year: SolarTime,
    pub leap_month: Option<u8>,
    /// Month lengths in calendar order, the leap month right after its
    /// namesake. 12 entries, or 13 with a leap month.
    pub month_days: Vec<u8>,
}

impl LunarYearTable {
    fn validate(&self) -> Result<(), CalendarError> {
        let expected = if self.leap_month.is_some() { 13 } else { 12 };
        if self.month_days.len() != expected {
            return Err(CalendarError::Parse(format!(
                "year {}: expected {expected} month lengths, got {}",
                self.year,
                self.month_days.len()
            )));
        }
        if let Some(leap) = self.leap_month {
            if !(1..=12).contains(&leap) {
                return Err(CalendarError::InvalidMonth(leap));
            }
        }
        if let Some(bad) = self.month_days.iter().find(|&&d| d != 29 && d != 30) {
            return Err(CalendarError::Parse(format!(
                "year {}: month length {bad} is not 29 or 30",
                self.year
            )));
        }
        self.new_year.validate()
    }

    /// Position of a month within `month_days`.
    fn slot(&self, month: LunarMonth) -> Result<usize, CalendarError> {
        let n = month.number as usize;
        match self.leap_month {
            Some(l) if month.leap && month.number == l => Ok(l as usize),
            Some(l) if !month.leap && month.number > l => Ok(n),
            _ if month.leap => Err(CalendarError::InvalidMonth(month.number)),
            _ => Ok(n - 1),
        }
    }

    /// Month at a position within `month_days`.
    fn month_at(&self, slot: usize) -> LunarMonth {
        let (number, leap) = match self.leap_month {
            Some(l) if slot == l as usize => (l, true),
            Some(l) if slot > l as usize => (slot as u8, false),
            _ => (slot as u8 + 1, false),
        };
        LunarMonth { number, leap }
    }

    fn total_days(&self) -> i64 {
        self.month_days.iter().map(|&d| d as i64).sum()
    }
}

/// A [`LunisolarCalendar`] answering from per-year tables.
#[derive(Debug, Clone, Default)]
pub struct TableCalendar {
    years: BTreeMap<i32, LunarYearTable>,
}

impl TableCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a year. Invalid tables are rejected.
    pub fn try_insert(&mut self, table: LunarYearTable) -> Result<(), CalendarError> {
        table.validate()?;
        self.years.insert(table.year, table);
        Ok(())
    }

    /// Number of years covered.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    fn year(&self, year: i32) -> Result<&LunarYearTable, CalendarError> {
        self.years
            .get(&year)
            .ok_or(CalendarError::Unsupported("lunar year not in table"))
    }
}

impl LunisolarCalendar for TableCalendar {
    fn leap_month(&self, year: i32) -> Result<Option<u8>, CalendarError> {
        Ok(self.year(year)?.leap_month)
    }

    fn month_days(&self, year: i32, month: LunarMonth) -> Result<u8, CalendarError> {
        let table = self.year(year)?;
        Ok(table.month_days[table.slot(month)?])
    }

    fn to_lunar(&self, solar: &SolarTime) -> Result<LunarTime, CalendarError> {
        let (hour, minute, second) = solar.clock()?;
        let day = solar.rata_die()?;
        // The lunar year containing a solar date starts in that solar year or the one before.
        for year in [solar.year, solar.year - 1] {
            let Ok(table) = self.year(year) else {
                continue;
            };
            let mut offset = day - table.new_year.rata_die()?;
            if offset < 0 || offset >= table.total_days() {
                continue;
            }
            for (slot, &len) in table.month_days.iter().enumerate() {
                if offset < len as i64 {
                    return Ok(LunarTime::new(
                        year,
                        table.month_at(slot),
                        offset as u8 + 1,
                        hour,
                        minute,
                        second,
                    ));
                }
                offset -= len as i64;
            }
        }
        Err(CalendarError::Unsupported("solar date outside table range"))
    }

    fn to_solar(&self, lunar: &LunarTime) -> Result<SolarTime, CalendarError> {
        let table = self.year(lunar.year)?;
        let slot = table.slot(lunar.month)?;
        if lunar.day == 0 || lunar.day > table.month_days[slot] {
            return Err(CalendarError::InvalidDay(lunar.day.into()));
        }
        let before: i32 = table.month_days[..slot].iter().map(|&d| i32::from(d)).sum();
        let offset = before + i32::from(lunar.day) - 1;
        let date = table
            .new_year
            .iso_date()?
            .added(DateDuration::new(0, 0, 0, offset));
        Ok(SolarTime::from_iso(
            &date,
            lunar.hour.into(),
            lunar.minute.into(),
            lunar.second.into(),
        ))
    }
}

impl FromStr for TableCalendar {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cal = TableCalendar::new();
        for (lineno, raw) in s.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [year, new_year, leap, lengths] = fields.as_slice() else {
                return Err(CalendarError::Parse(format!(
                    "line {}: expected 4 fields, got {}",
                    lineno + 1,
                    fields.len()
                )));
            };
            let leap: u8 = leap.parse()?;
            let month_days = lengths
                .split(',')
                .map(|d| d.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()?;
            cal.try_insert(LunarYearTable {
                year: year.parse()?,
                new_year: new_year.parse()?,
                leap_month: (leap != 0).then_some(leap),
                month_days,
            })?;
        }
        Ok(cal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
# synthetic test data
2020 2020-01-25 4 29,30,30,30,29,30,29,30,29,30,30,29,29
2021 2021-02-12 0 29,30,30,29,30,29,30,29,30,29,30,30
";

    #[test]
    fn parses_text_table() {
        let cal: TableCalendar = TABLE.parse().unwrap();
        assert_eq!(cal.len(), 2);
        assert_eq!(cal.leap_month(2020).unwrap(), Some(4));
        assert_eq!(cal.leap_month(2021).unwrap(), None);
    }

    #[test]
    fn new_year_maps_to_first_day() {
        let cal: TableCalendar = TABLE.parse().unwrap();
        let l = cal.to_lunar(&SolarTime::new(2020, 1, 25, 8, 0, 0)).unwrap();
        assert_eq!((l.year, l.month.number, l.month.leap, l.day), (2020, 1, false, 1));
        assert_eq!(l.hour, 8);
    }

    #[test]
    fn day_before_new_year_belongs_to_previous_year() {
        let cal: TableCalendar = TABLE.parse().unwrap();
        let l = cal.to_lunar(&SolarTime::new(2021, 2, 11, 8, 0, 0)).unwrap();
        assert_eq!((l.year, l.month.number, l.day), (2020, 12, 29));
    }

    #[test]
    fn leap_month_found() {
        let cal: TableCalendar = TABLE.parse().unwrap();
        // 29+30+30+30 = 119 days after new year is leap 4, day 1.
        let l = cal.to_lunar(&SolarTime::new(2020, 5, 23, 12, 0, 0)).unwrap();
        assert_eq!(l.month, LunarMonth::leap(4).unwrap());
        assert_eq!(l.day, 1);
    }

    #[test]
    fn solar_lunar_roundtrip() {
        let cal: TableCalendar = TABLE.parse().unwrap();
        let lunar = LunarTime::new(2020, LunarMonth::new(7).unwrap(), 17, 6, 30, 0);
        let solar = cal.to_solar(&lunar).unwrap();
        assert_eq!(cal.to_lunar(&solar).unwrap(), lunar);
    }

    #[test]
    fn out_of_range_is_unsupported() {
        let cal: TableCalendar = TABLE.parse().unwrap();
        let err = cal.to_lunar(&SolarTime::new(1999, 6, 1, 0, 0, 0)).unwrap_err();
        assert!(matches!(err, CalendarError::Unsupported(_)));
    }

    #[test]
    fn rejects_wrong_month_count() {
        let err = "2021 2021-02-12 3 29,30,30,29,30,29,30,29,30,29,30,30"
            .parse::<TableCalendar>()
            .unwrap_err();
        assert!(matches!(err, CalendarError::Parse(_)));
    }
}
