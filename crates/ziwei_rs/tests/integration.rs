//! Integration tests for ziwei_rs on the Chinese calendar, plus a small
//! in-memory table for the calendar-agnostic entry points.
//!
//! Policy-sensitive cases pass explicit [`Settings`] so they never race with
//! the global defaults.

use ziwei_rs::*;

const TABLE: &str = "\
2020 2020-01-25 4 29,30,30,30,29,30,29,30,29,30,30,29,29
2021 2021-02-12 0 29,30,30,29,30,29,30,29,30,29,30,30
";

fn table() -> TableCalendar {
    TABLE.parse().unwrap()
}

fn solar(text: &str) -> SolarParams {
    SolarParams {
        name: "test".into(),
        gender: Gender::Male,
        solar: text.parse().unwrap(),
        locale: Some(Locale::ZhCn),
    }
}

fn lunar(date: &str) -> LunarParams {
    LunarParams {
        name: "lunar".into(),
        gender: Gender::Male,
        date: date.into(),
        locale: Some(Locale::ZhCn),
    }
}

fn with_config(config: ChartConfig) -> Settings {
    Settings {
        config,
        locale: Locale::ZhCn,
    }
}

fn from_lunar(date: &str, settings: &Settings) -> Result<Chart, ZiweiError> {
    chart_from_lunar(&lunar(date), &ChineseCalendar::new(), settings)
}

#[test]
fn solar_new_year_noon() {
    let chart = by_solar(&solar("2020-01-25T12:00")).unwrap();
    assert_eq!(chart.birth.year, 2020);
    assert_eq!((chart.birth.month_index, chart.birth.day, chart.birth.hour_index), (0, 1, 6));
    assert_eq!(chart.solar_text.as_deref(), Some("2020-01-25 12:00"));
    assert_eq!(chart.lunar_text, "庚子年正月初一 午时");
    // Month index 0, hour index 6: life palace in Shen, Jia-Shen is water.
    assert_eq!(chart.main_palace_index, 6);
    assert_eq!(chart.five_element_name, "水二局");
    // Still before Lichun, so the pillars keep Ji-Hai.
    assert_eq!(chart.sexagenary_text.as_deref(), Some("己亥 丁丑 丁卯 丙午"));
}

#[test]
fn late_zi_moves_to_next_day_by_default() {
    let chart = chart_from_solar(
        &solar("2020-01-25T23:30"),
        &ChineseCalendar::new(),
        &Settings::default(),
    )
    .unwrap();
    assert_eq!((chart.birth.day, chart.birth.hour_index), (2, 0));
    // Lunar text shows the converted date before correction.
    assert_eq!(chart.lunar_text, "庚子年正月初一 子时");
}

#[test]
fn late_zi_stays_under_current_division() {
    let settings = with_config(ChartConfig {
        day_division: DayDivision::Current,
        ..ChartConfig::default()
    });
    let chart =
        chart_from_solar(&solar("2020-01-25T23:30"), &ChineseCalendar::new(), &settings).unwrap();
    assert_eq!((chart.birth.day, chart.birth.hour_index), (1, 0));
}

#[test]
fn leap_month_birth_follows_policy() {
    // 2020-06-11 is day 20 of the leap fourth month.
    let params = solar("2020-06-11T08:00");
    let cal = ChineseCalendar::new();

    let normal = chart_from_solar(&params, &cal, &Settings::default()).unwrap();
    assert_eq!((normal.birth.month_index, normal.birth.day), (4, 20));
    assert_eq!(normal.lunar_text, "庚子年闰四月二十 辰时");

    let last = with_config(ChartConfig {
        month_division: MonthDivision::Last,
        ..ChartConfig::default()
    });
    let chart = chart_from_solar(&params, &cal, &last).unwrap();
    assert_eq!(chart.birth.month_index, 3);
}

#[test]
fn solar_outside_table_is_rejected() {
    let err = chart_from_solar(&solar("1999-06-01T08:00"), &table(), &Settings::default());
    assert!(matches!(err, Err(ZiweiError::Calendar(_))));
}

#[test]
fn lunar_string_chart() {
    let chart = by_lunar(&lunar("2000-8-16-2")).unwrap();
    assert_eq!(chart.main_palace_index, 5);
    assert_eq!(chart.lunar_text, "庚辰年八月十六 寅时");
    assert_eq!(chart.solar_text.as_deref(), Some("2000-09-13 04:30"));
}

#[test]
fn lunar_string_fills_solar_and_pillars() {
    let chart = by_lunar(&lunar("1998-1-23-1")).unwrap();
    assert_eq!(chart.solar_text.as_deref(), Some("1998-02-19 02:30"));
    assert_eq!(chart.sexagenary_text.as_deref(), Some("戊寅 甲寅 丁酉 辛丑"));
    assert_eq!(chart.lunar_text, "戊寅年正月廿三 丑时");
}

#[test]
fn lunar_leap_day_thirty_clamps_into_short_month() {
    // Leap 6 of 2017 has 30 days; months 6 and 7 both have 29.
    let normal = from_lunar("2017-6L-30-5", &Settings::default()).unwrap();
    assert_eq!((normal.birth.month_index, normal.birth.day), (6, 29));
    assert_eq!(normal.lunar_text, "丁酉年闰六月三十 巳时");
    assert_eq!(normal.solar_text.as_deref(), Some("2017-08-21 10:30"));

    let last = with_config(ChartConfig {
        month_division: MonthDivision::Last,
        ..ChartConfig::default()
    });
    let chart = from_lunar("2017-6L-30-5", &last).unwrap();
    assert_eq!((chart.birth.month_index, chart.birth.day), (5, 29));
}

#[test]
fn lunar_late_zi_index() {
    let chart = from_lunar("2020-1-1-12", &Settings::default()).unwrap();
    assert_eq!(chart.solar_text.as_deref(), Some("2020-01-25 23:30"));
    assert_eq!((chart.birth.day, chart.birth.hour_index), (2, 0));
    assert_eq!(chart.lunar_text, "庚子年正月初一 子时");

    let current = with_config(ChartConfig {
        day_division: DayDivision::Current,
        ..ChartConfig::default()
    });
    let chart = from_lunar("2020-1-1-12", &current).unwrap();
    assert_eq!((chart.birth.day, chart.birth.hour_index), (1, 0));
}

#[test]
fn lunar_late_zi_on_new_year_eve_rolls_the_year() {
    let chart = from_lunar("2019-12-30-12", &Settings::default()).unwrap();
    assert_eq!(chart.birth.year, 2020);
    assert_eq!((chart.birth.month_index, chart.birth.day), (0, 1));
    assert_eq!(chart.lunar_text, "己亥年腊月三十 子时");
}

#[test]
fn lunar_missing_leap_month_is_rejected() {
    let err = by_lunar(&lunar("2021-4L-3-5"));
    assert!(matches!(err, Err(ZiweiError::Calendar(_))));
}

#[test]
fn lunar_string_with_calendar_adds_solar_text() {
    let params = LunarParams {
        name: "lunar".into(),
        gender: Gender::Female,
        date: "2020-1-1-6".into(),
        locale: Some(Locale::ZhHant),
    };
    let chart = by_lunar_with_calendar(&params, &table()).unwrap();
    assert_eq!(chart.solar_text.as_deref(), Some("2020-01-25 12:30"));
    assert_eq!(chart.lunar_text, "庚子年正月初一 午時");
}

#[test]
fn lunar_and_solar_paths_agree() {
    let from_solar = by_solar(&solar("2020-01-25T12:00")).unwrap();
    let from_lunar = by_lunar(&lunar("2020-1-1-6")).unwrap();
    assert_eq!(from_solar.palaces, from_lunar.palaces);
    assert_eq!(from_solar.sexagenary_text, from_lunar.sexagenary_text);
}

#[test]
fn malformed_lunar_string() {
    let err = by_lunar(&LunarParams {
        name: "bad".into(),
        gender: Gender::Male,
        date: "2000-8-16".into(),
        locale: None,
    });
    assert!(matches!(err, Err(ZiweiError::Parse(_))));
}

#[test]
fn horoscope_at_current_time() {
    let chart = by_solar(&solar("2020-01-25T12:00")).unwrap();
    let now: SolarTime = "2021-03-01T10:00".parse().unwrap();
    let h = current_horoscope(&chart, &now).unwrap();
    // Nominal age 2 opens the water bureau's first period at the life palace.
    assert_eq!(h.anchor, HoroscopeAnchor::Age { age: 2 });
    assert_eq!(h.index, chart.main_palace_index);
}

#[test]
fn horoscope_before_first_period_falls_back() {
    let cal = table();
    let chart = chart_from_solar(&solar("2020-01-25T12:00"), &cal, &Settings::default()).unwrap();
    let now: SolarTime = "2020-03-01T10:00".parse().unwrap();
    let h = horoscope_at_time(&chart, &cal, &now, &Settings::default()).unwrap();
    assert_eq!(h.anchor, HoroscopeAnchor::OutOfRange { age: 1 });
    assert_eq!(h.index, 0);
}
