//! Chart assembly: palaces, placed stars and chart metadata.

use serde::Serialize;
use tracing::{debug, instrument};
use ziwei_time::{Branch, NormalizedDate, Stem};

use crate::error::ChartError;
use crate::five_element::{FiveElement, five_element};
use crate::horoscope::{
    AgeRange, Gender, Horoscope, HoroscopeAnchor, period_direction, period_ranges, resolve_period,
};
use crate::locale::{
    Locale, branch_name, five_element_name, gender_name, hour_name, lunar_date_text, palace_name,
    star_abbr, star_name, stem_name, transformation_name, yin_yang_name, zodiac_name,
};
use crate::palace::{
    PalaceRole, is_origin_palace, main_palace_index, palace_branch, palace_role,
    palace_stem_branches,
};
use crate::placement::{StarAnchors, StarLayout, layout_major, layout_minor, minor_anchors, star_anchors};
use crate::star::{Galaxy, Star, StarKind};
use crate::transformation::{SelfTransformations, Transformation, transformation_of, transformed_stars};
use crate::util::{PALACE_COUNT, check_palace, opposite};

/// Clock span of each hour branch, Zi first.
pub const HOUR_RANGES: [&str; 12] = [
    "23:00~00:59",
    "01:00~02:59",
    "03:00~04:59",
    "05:00~06:59",
    "07:00~08:59",
    "09:00~10:59",
    "11:00~12:59",
    "13:00~14:59",
    "15:00~16:59",
    "17:00~18:59",
    "19:00~20:59",
    "21:00~22:59",
];

/// Everything needed to cast a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInput {
    pub name: String,
    pub gender: Gender,
    pub birth: NormalizedDate,
    pub locale: Locale,
    /// Solar birth time text, when the chart came from a solar date.
    pub solar_text: Option<String>,
    /// Lunar date text; rendered from `birth` when absent.
    pub lunar_text: Option<String>,
    /// Eight-character text, when a calendar supplied one.
    pub sexagenary_text: Option<String>,
}

impl ChartInput {
    pub fn new(name: impl Into<String>, gender: Gender, birth: NormalizedDate, locale: Locale) -> Self {
        Self {
            name: name.into(),
            gender,
            birth,
            locale,
            solar_text: None,
            lunar_text: None,
            sexagenary_text: None,
        }
    }
}

/// A star bound to a palace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedStar {
    pub star: Star,
    pub name: &'static str,
    pub abbr: &'static str,
    pub kind: StarKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub galaxy: Option<Galaxy>,
    /// Birth-year transformation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformation: Option<Transformation>,
    pub self_transformations: SelfTransformations,
}

impl PlacedStar {
    fn new(star: Star, year_stem: Stem, own_stem: Stem, opposite_stem: Stem, locale: Locale) -> Self {
        Self {
            star,
            name: star_name(locale, star),
            abbr: star_abbr(locale, star),
            kind: star.kind(),
            galaxy: star.galaxy(),
            transformation: transformation_of(year_stem, star),
            self_transformations: SelfTransformations::of(star, own_stem, opposite_stem),
        }
    }

    /// Localized birth-year transformation label.
    pub fn transformation_name(&self, locale: Locale) -> Option<&'static str> {
        self.transformation.map(|t| transformation_name(locale, t))
    }
}

/// One of the twelve palaces of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palace {
    pub index: u8,
    pub role: PalaceRole,
    pub name: &'static str,
    pub stem: Stem,
    pub branch: Branch,
    pub stem_name: &'static str,
    pub branch_name: &'static str,
    pub is_origin: bool,
    pub major_stars: Vec<PlacedStar>,
    pub minor_stars: Vec<PlacedStar>,
    pub range: AgeRange,
}

impl Palace {
    /// Stars the palace stem transforms (flying transformations), in Lu,
    /// Quan, Ke, Ji order.
    pub fn flying_stars(&self) -> [Star; 4] {
        transformed_stars(self.stem)
    }

    /// Major then minor stars.
    pub fn stars(&self) -> impl Iterator<Item = &PlacedStar> {
        self.major_stars.iter().chain(self.minor_stars.iter())
    }

    pub fn has_star(&self, star: Star) -> bool {
        self.stars().any(|s| s.star == star)
    }
}

/// A complete chart. Immutable once built; horoscopes are recomputed on
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub name: String,
    pub gender: Gender,
    pub gender_name: &'static str,
    /// Yin or yang of the birth-year stem.
    pub yin_yang_name: &'static str,
    pub locale: Locale,
    pub birth: NormalizedDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solar_text: Option<String>,
    pub lunar_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sexagenary_text: Option<String>,
    pub zodiac: &'static str,
    pub hour_name: String,
    pub hour_range: &'static str,
    pub five_element: FiveElement,
    pub five_element_name: &'static str,
    pub main_palace_index: u8,
    pub anchors: StarAnchors,
    /// +1 when major periods run forward through the palaces.
    pub direction: i8,
    pub palaces: Vec<Palace>,
}

impl Chart {
    /// Palace holding the given role.
    pub fn palace_by_role(&self, role: PalaceRole) -> &Palace {
        // Every role occurs exactly once.
        let index = self.palaces.iter().position(|p| p.role == role).unwrap_or(0);
        &self.palaces[index]
    }

    /// Palace holding a star, if any.
    pub fn palace_of(&self, star: Star) -> Option<&Palace> {
        self.palaces.iter().find(|p| p.has_star(star))
    }

    pub fn ziwei_branch(&self) -> Branch {
        palace_branch(self.anchors.ziwei)
    }

    pub fn main_palace_branch(&self) -> Branch {
        palace_branch(self.main_palace_index)
    }

    fn ranges(&self) -> [AgeRange; 12] {
        std::array::from_fn(|i| self.palaces[i].range)
    }

    /// Horoscope anchored at an explicit palace.
    pub fn horoscope_at(&self, index: u8) -> Result<Horoscope, ChartError> {
        let index = check_palace(index)?;
        Ok(self.horoscope(index, HoroscopeAnchor::Index))
    }

    /// Horoscope of the period containing a nominal age.
    pub fn horoscope_for_age(&self, age: i32) -> Horoscope {
        let (index, anchor) = resolve_period(&self.ranges(), age);
        self.horoscope(index, anchor)
    }

    /// Horoscope for a lunar calendar year (nominal age counted from birth).
    pub fn horoscope_for_year(&self, year: i32) -> Horoscope {
        self.horoscope_for_age(year - self.birth.year + 1)
    }

    fn horoscope(&self, index: u8, anchor: HoroscopeAnchor) -> Horoscope {
        Horoscope::build(
            index,
            anchor,
            &self.ranges(),
            self.birth.branch,
            self.birth.year,
            self.locale,
        )
    }
}

fn place_stars(
    layout: &StarLayout,
    index: usize,
    year_stem: Stem,
    pairs: &[(Stem, Branch); 12],
    locale: Locale,
) -> Vec<PlacedStar> {
    let own = pairs[index].0;
    let facing = pairs[opposite(index as u8) as usize].0;
    layout[index]
        .iter()
        .map(|&star| PlacedStar::new(star, year_stem, own, facing, locale))
        .collect()
}

/// Cast a chart.
#[instrument(skip_all, fields(year = input.birth.year, month = input.birth.month_index, day = input.birth.day, hour = input.birth.hour_index))]
pub fn build_chart(input: ChartInput) -> Result<Chart, ChartError> {
    let birth = input.birth;
    let locale = input.locale;
    let year_stem = birth.stem;

    let pairs = palace_stem_branches(year_stem);
    let main = main_palace_index(birth.month_index, birth.hour_index)?;
    let (main_stem, main_branch) = pairs[main as usize];
    let fe = five_element(main_stem, main_branch);
    let anchors = star_anchors(birth.day, fe)?;
    let majors = layout_major(&anchors);
    let minors = layout_minor(&minor_anchors(birth.month_index, birth.hour_index)?);
    let direction = period_direction(input.gender, year_stem);
    let ranges = period_ranges(main, direction, fe);

    debug!(
        main_palace = main,
        five_element = fe.value(),
        ziwei = anchors.ziwei,
        tianfu = anchors.tianfu,
        direction,
        "chart anchors resolved"
    );

    let palaces = (0..PALACE_COUNT)
        .map(|i| {
            let (stem, branch) = pairs[i];
            let role = palace_role(main, i as u8);
            Palace {
                index: i as u8,
                role,
                name: palace_name(locale, role),
                stem,
                branch,
                stem_name: stem_name(locale, stem),
                branch_name: branch_name(locale, branch),
                is_origin: is_origin_palace(year_stem, stem, branch),
                major_stars: place_stars(&majors, i, year_stem, &pairs, locale),
                minor_stars: place_stars(&minors, i, year_stem, &pairs, locale),
                range: ranges[i],
            }
        })
        .collect();

    let lunar_text = input.lunar_text.unwrap_or_else(|| {
        lunar_date_text(
            locale,
            birth.stem,
            birth.branch,
            birth.lunar.month,
            birth.lunar.day,
            birth.hour_index,
        )
    });

    Ok(Chart {
        name: input.name,
        gender: input.gender,
        gender_name: gender_name(locale, input.gender),
        yin_yang_name: yin_yang_name(locale, birth.stem),
        locale,
        birth,
        solar_text: input.solar_text,
        lunar_text,
        sexagenary_text: input.sexagenary_text,
        zodiac: zodiac_name(locale, birth.branch),
        hour_name: hour_name(locale, birth.hour_index),
        hour_range: HOUR_RANGES[birth.hour_index as usize],
        five_element: fe,
        five_element_name: five_element_name(locale, fe),
        main_palace_index: main,
        anchors,
        direction,
        palaces,
    })
}
