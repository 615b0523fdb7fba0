//! Convenience entry points for casting ZiWei Dou Shu charts.
//!
//! Wraps the calendar normalizer and chart assembly behind two calls,
//! [`by_solar`] and [`by_lunar`], reading the division policy and display
//! locale from process-wide [`Settings`]. Both run on the Chinese calendar
//! ([`ChineseCalendar`]); the `*_with_calendar` variants take any
//! [`LunisolarCalendar`].
//!
//! # Quick start
//!
//! ```rust,ignore
//! use ziwei_rs::*;
//!
//! let chart = by_lunar(&LunarParams {
//!     name: "example".into(),
//!     gender: Gender::Male,
//!     date: "2000-8-16-2".into(),
//!     locale: None,
//! })
//! .unwrap();
//! println!("{} {}", chart.lunar_text, chart.five_element_name);
//! ```

pub mod convenience;
pub mod date;
pub mod error;
pub mod global;

pub use convenience::{
    LunarParams, SolarParams, by_lunar, by_lunar_with_calendar, by_solar, by_solar_with_calendar,
    chart_from_lunar, chart_from_solar, current_horoscope, current_horoscope_with_calendar,
    horoscope_at_time,
};
pub use date::LunarDate;
pub use error::ZiweiError;
pub use global::{Settings, apply_overrides, reset, set_config, set_locale, settings};

// Re-export the types callers need so they can depend on this crate alone.
pub use ziwei_base::{
    AgeRange, Chart, Gender, Horoscope, HoroscopeAnchor, HoroscopePalace, Locale, Palace,
    PalaceRole, PlacedStar, Star, Transformation, translate,
};
pub use ziwei_time::{
    ChartConfig, ChineseCalendar, DayDivision, EightChar, LunisolarCalendar, MonthDivision,
    SolarTime, TableCalendar, YearDivision,
};
