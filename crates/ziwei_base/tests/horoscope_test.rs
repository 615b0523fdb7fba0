//! Integration tests for major periods and the horoscope view.

use ziwei_base::{
    AgeRange, ChartInput, Gender, HoroscopeAnchor, Locale, PalaceRole, build_chart,
};
use ziwei_time::NormalizedDate;

fn geng_wu_female() -> ziwei_base::Chart {
    let birth = NormalizedDate::from_indices(1990, 1, 1, 0).unwrap();
    build_chart(ChartInput::new("h", Gender::Female, birth, Locale::ZhCn)).unwrap()
}

#[test]
fn age_selects_period_palace() {
    let c = geng_wu_female();
    let h = c.horoscope_for_age(30);
    assert_eq!(h.index, 10);
    assert_eq!(h.anchor, HoroscopeAnchor::Age { age: 30 });
    assert_eq!(h.range, AgeRange { start: 25, end: 34 });
    assert_eq!(h.main_palace().role, PalaceRole::Ming);
    assert_eq!(h.main_palace().name, "大命");
    assert_eq!(h.palaces[9].role, PalaceRole::XiongDi);
}

#[test]
fn year_maps_to_nominal_age() {
    let c = geng_wu_female();
    // 2019 - 1990 + 1 = 30.
    assert_eq!(c.horoscope_for_year(2019), c.horoscope_for_age(30));
}

#[test]
fn flow_years_start_at_birth_branch() {
    let c = geng_wu_female();
    let h = c.horoscope_for_age(30);
    // Wu is palace 4; 4 + 25 - 1 = 28 wraps to palace 4.
    assert_eq!(h.palaces[4].age, Some(25));
    assert_eq!(h.palaces[4].year, Some(2014));
    assert_eq!(h.palaces[4].text.as_deref(), Some("2014年25岁"));
    assert_eq!(h.palaces[1].age, Some(34));
    assert_eq!(h.palaces[1].year, Some(2023));
    assert_eq!(h.palaces[2].age, None);
    assert_eq!(h.palaces[3].year, None);
}

#[test]
fn young_age_falls_back_to_first_palace() {
    let c = geng_wu_female();
    let h = c.horoscope_for_age(4);
    assert_eq!(h.anchor, HoroscopeAnchor::OutOfRange { age: 4 });
    assert_eq!(h.index, 0);
    assert_eq!(h.range, AgeRange { start: 5, end: 14 });
}

#[test]
fn explicit_palace_index() {
    let c = geng_wu_female();
    let h = c.horoscope_at(11).unwrap();
    assert_eq!(h.anchor, HoroscopeAnchor::Index);
    assert_eq!(h.range, AgeRange { start: 15, end: 24 });
    assert!(c.horoscope_at(12).is_err());
}

#[test]
fn horoscope_does_not_alter_chart() {
    let c = geng_wu_female();
    let before = c.clone();
    let _ = c.horoscope_for_age(50);
    assert_eq!(c, before);
}

#[test]
fn anchor_serializes_with_kind_tag() {
    let c = geng_wu_female();
    let json = serde_json::to_value(c.horoscope_for_age(30)).unwrap();
    assert_eq!(json["anchor"]["kind"], "age");
    assert_eq!(json["anchor"]["age"], 30);
    assert_eq!(json["palaces"].as_array().unwrap().len(), 12);
}
