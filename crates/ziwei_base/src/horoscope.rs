//! Major periods (大限) and the horoscope view derived from them.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ziwei_time::{Branch, Stem};

use crate::five_element::FiveElement;
use crate::locale::{Locale, horoscope_palace_name, yearly_text};
use crate::palace::{PalaceRole, branch_palace_index, palace_role};
use crate::util::{PALACE_COUNT, palace_index};

/// Gender of the chart subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// 0 for female, 1 for male.
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "female" => Some(Self::Female),
            "male" => Some(Self::Male),
            _ => None,
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown gender '{s}' (expected male or female)"))
    }
}

/// Direction the major periods travel: +1 for yang males and yin females,
/// -1 otherwise.
pub const fn period_direction(gender: Gender, year_stem: Stem) -> i8 {
    if gender.value() == (year_stem.index() + 1) % 2 { 1 } else { -1 }
}

/// Inclusive range of nominal ages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgeRange {
    pub start: u16,
    pub end: u16,
}

impl AgeRange {
    pub const fn contains(&self, age: i32) -> bool {
        self.start as i32 <= age && age <= self.end as i32
    }
}

/// Ten-year age ranges of the twelve palaces, indexed by palace.
///
/// The life palace opens at the bureau number; each following palace in
/// `direction` adds ten years.
pub fn period_ranges(main_palace: u8, direction: i8, five_element: FiveElement) -> [AgeRange; 12] {
    let base = five_element.value() as u16;
    let mut ranges = [AgeRange { start: 0, end: 0 }; PALACE_COUNT];
    for i in 0..PALACE_COUNT {
        let index = palace_index(main_palace as i32 + direction as i32 * i as i32);
        let start = base + 10 * i as u16;
        ranges[index as usize] = AgeRange {
            start,
            end: start + 9,
        };
    }
    ranges
}

/// How the horoscope anchor palace was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HoroscopeAnchor {
    /// Palace index given by the caller.
    Index,
    /// The period containing this nominal age.
    Age { age: i32 },
    /// No period contains the age; palace 0 is used.
    OutOfRange { age: i32 },
}

/// Palace whose period contains `age`, or palace 0 flagged as out of range.
pub fn resolve_period(ranges: &[AgeRange; 12], age: i32) -> (u8, HoroscopeAnchor) {
    match ranges.iter().position(|r| r.contains(age)) {
        Some(i) => (i as u8, HoroscopeAnchor::Age { age }),
        None => (0, HoroscopeAnchor::OutOfRange { age }),
    }
}

/// One palace seen from a major period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoroscopePalace {
    pub index: u8,
    /// Role relative to the period's palace.
    pub role: PalaceRole,
    pub name: String,
    /// Nominal age and calendar year of the flow year in this palace, set
    /// for the ten years of the period only.
    pub age: Option<u16>,
    pub year: Option<i32>,
    pub text: Option<String>,
}

/// The chart re-read from one major period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Horoscope {
    /// Palace of the period.
    pub index: u8,
    pub anchor: HoroscopeAnchor,
    pub range: AgeRange,
    pub palaces: Vec<HoroscopePalace>,
}

impl Horoscope {
    /// Build the view anchored at palace `index`.
    ///
    /// Flow years start in the palace of the birth-year branch counted
    /// forward by the period's first age, and fill ten consecutive palaces.
    pub fn build(
        index: u8,
        anchor: HoroscopeAnchor,
        ranges: &[AgeRange; 12],
        birth_branch: Branch,
        birth_year: i32,
        locale: Locale,
    ) -> Self {
        let range = ranges[index as usize];
        let mut palaces: Vec<HoroscopePalace> = (0..PALACE_COUNT as u8)
            .map(|i| {
                let role = palace_role(index, i);
                HoroscopePalace {
                    index: i,
                    role,
                    name: horoscope_palace_name(locale, role).to_string(),
                    age: None,
                    year: None,
                    text: None,
                }
            })
            .collect();

        let yearly_start = branch_palace_index(birth_branch) as i32 + range.start as i32 - 1;
        for i in 0..10u16 {
            let palace = &mut palaces[palace_index(yearly_start + i as i32) as usize];
            let age = range.start + i;
            let year = birth_year + age as i32 - 1;
            palace.age = Some(age);
            palace.year = Some(year);
            palace.text = Some(yearly_text(locale, year, age));
        }

        Self {
            index,
            anchor,
            range,
            palaces,
        }
    }

    /// The period's own palace view.
    pub fn main_palace(&self) -> &HoroscopePalace {
        &self.palaces[self.index as usize]
    }
}
