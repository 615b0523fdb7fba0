use tracing::debug;
use ziwei_base::locale::{eight_char_text, lunar_date_text};
use ziwei_base::{Chart, ChartInput, Gender, Horoscope, Locale, build_chart};
use ziwei_time::{
    ChineseCalendar, EightChar, LunarTime, LunisolarCalendar, SolarTime, fold_hour_index,
    hour_index, normalize_birth, sexagenary_from_year,
};

use crate::date::LunarDate;
use crate::error::ZiweiError;
use crate::global::{Settings, settings};

/// Inputs for a chart cast from a civil (solar) birth time.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarParams {
    pub name: String,
    pub gender: Gender,
    pub solar: SolarTime,
    /// Overrides the default locale for this chart only.
    pub locale: Option<Locale>,
}

/// Inputs for a chart cast from a lunar date string
/// (`year-month-day-hourIndex`, see [`LunarDate`]).
#[derive(Debug, Clone, PartialEq)]
pub struct LunarParams {
    pub name: String,
    pub gender: Gender,
    pub date: String,
    pub locale: Option<Locale>,
}

/// Cast a chart from a solar birth time on the Chinese calendar, using the
/// global settings.
pub fn by_solar(params: &SolarParams) -> Result<Chart, ZiweiError> {
    chart_from_solar(params, &ChineseCalendar::new(), &settings())
}

/// Like [`by_solar`] on another calendar.
pub fn by_solar_with_calendar<C: LunisolarCalendar + ?Sized>(
    params: &SolarParams,
    cal: &C,
) -> Result<Chart, ZiweiError> {
    chart_from_solar(params, cal, &settings())
}

/// Cast a chart from a solar birth time under explicit settings.
///
/// The calendar converts the instant to a lunar date, which is then
/// normalized (late Zi hour, leap month) under `settings.config`. The
/// chart's lunar text shows the date as converted, before normalization.
pub fn chart_from_solar<C: LunisolarCalendar + ?Sized>(
    params: &SolarParams,
    cal: &C,
    settings: &Settings,
) -> Result<Chart, ZiweiError> {
    params.solar.validate()?;
    let lunar = cal.to_lunar(&params.solar)?;
    debug!(solar = %params.solar, lunar_year = lunar.year, day = lunar.day, "solar birth converted");
    let locale = params.locale.unwrap_or(settings.locale);
    assemble(&params.name, params.gender, locale, cal, &lunar, &params.solar, settings)
}

/// Cast a chart from a lunar date string on the Chinese calendar, using
/// the global settings.
pub fn by_lunar(params: &LunarParams) -> Result<Chart, ZiweiError> {
    chart_from_lunar(params, &ChineseCalendar::new(), &settings())
}

/// Like [`by_lunar`] on another calendar.
pub fn by_lunar_with_calendar<C: LunisolarCalendar + ?Sized>(
    params: &LunarParams,
    cal: &C,
) -> Result<Chart, ZiweiError> {
    chart_from_lunar(params, cal, &settings())
}

/// Cast a chart from a lunar date string under explicit settings.
///
/// The clock time is taken from the middle of the hour slot (23:30 for the
/// late Zi index 12). The date then goes through the same normalization as
/// a solar birth, and the calendar supplies the solar date.
pub fn chart_from_lunar<C: LunisolarCalendar + ?Sized>(
    params: &LunarParams,
    cal: &C,
    settings: &Settings,
) -> Result<Chart, ZiweiError> {
    let date: LunarDate = params.date.parse()?;
    let lunar = date.to_lunar_time()?;
    let solar = cal.to_solar(&lunar)?;
    debug!(%date, %solar, "lunar birth converted");
    let locale = params.locale.unwrap_or(settings.locale);
    assemble(&params.name, params.gender, locale, cal, &lunar, &solar, settings)
}

/// Normalize `lunar` and build the chart with its solar, lunar and
/// eight-character texts.
fn assemble<C: LunisolarCalendar + ?Sized>(
    name: &str,
    gender: Gender,
    locale: Locale,
    cal: &C,
    lunar: &LunarTime,
    solar: &SolarTime,
    settings: &Settings,
) -> Result<Chart, ZiweiError> {
    let birth = normalize_birth(cal, lunar, &settings.config)?;
    let raw = sexagenary_from_year(lunar.year)?;
    let raw_hour = fold_hour_index(hour_index(lunar.hour)?);
    let eight = EightChar::of(solar)?;

    Ok(build_chart(ChartInput {
        name: name.to_string(),
        gender,
        birth,
        locale,
        solar_text: Some(solar.to_string()),
        lunar_text: Some(lunar_date_text(
            locale,
            raw.stem,
            raw.branch,
            lunar.month,
            lunar.day,
            raw_hour,
        )),
        sexagenary_text: Some(eight_char_text(locale, &eight)),
    })?)
}

/// Horoscope of the major period running at `now` on the Chinese calendar,
/// using the global division policy.
pub fn current_horoscope(chart: &Chart, now: &SolarTime) -> Result<Horoscope, ZiweiError> {
    horoscope_at_time(chart, &ChineseCalendar::new(), now, &settings())
}

/// Like [`current_horoscope`] on another calendar.
pub fn current_horoscope_with_calendar<C: LunisolarCalendar + ?Sized>(
    chart: &Chart,
    cal: &C,
    now: &SolarTime,
) -> Result<Horoscope, ZiweiError> {
    horoscope_at_time(chart, cal, now, &settings())
}

/// Horoscope of the major period running at `now` under explicit settings.
///
/// `now` is normalized like a birth time; the nominal age is the lunar
/// year difference plus one. Ages outside every period fall back to
/// palace 0 with an out-of-range anchor.
pub fn horoscope_at_time<C: LunisolarCalendar + ?Sized>(
    chart: &Chart,
    cal: &C,
    now: &SolarTime,
    settings: &Settings,
) -> Result<Horoscope, ZiweiError> {
    let lunar = cal.to_lunar(now)?;
    let current = normalize_birth(cal, &lunar, &settings.config)?;
    Ok(chart.horoscope_for_year(current.year))
}
