//! Lunisolar calendar types and birth-date normalization.
//!
//! This crate provides:
//! - Heavenly stems, earthly branches and the sexagenary year
//! - Solar and lunar date types
//! - The [`LunisolarCalendar`] collaborator trait, implemented on ICU4X's
//!   Chinese calendar ([`ChineseCalendar`]) and on fixed tables
//! - Eight characters (four pillars) of a solar instant
//! - Division policies ([`ChartConfig`]) and the birth-date normalizer

pub mod calendar;
pub mod chinese;
pub mod config;
pub mod eight_char;
pub mod error;
pub mod lunar;
pub mod normalize;
pub mod sexagenary;
pub mod solar_time;
pub mod table;

pub use calendar::{
    LunisolarCalendar, month_after_leap, month_before_leap, next_day, next_month, validate_lunar,
};
pub use chinese::ChineseCalendar;
pub use config::{ChartConfig, DayDivision, MonthDivision, YearDivision};
pub use eight_char::EightChar;
pub use error::CalendarError;
pub use lunar::{LunarMonth, LunarTime, hour_from_index};
pub use normalize::{
    LATE_ZI_INDEX, NormalizedDate, fix_late_zi, fix_leap_month, fold_hour_index, hour_index,
    normalize_birth,
};
pub use sexagenary::{ALL_BRANCHES, ALL_STEMS, Branch, MAX_YEAR, MIN_YEAR, Sexagenary, Stem, sexagenary_from_year};
pub use solar_time::SolarTime;
pub use table::{LunarYearTable, TableCalendar};
