//! Display names for chart labels in simplified and traditional Chinese.
//!
//! Every label is addressed by a stable key, never by its display text.
//! [`translate`] resolves dotted keys (`star.ZI_WEI.name`,
//! `branch.ZI.zodiac`, `palace.MING.horoscope`, ...); the typed helpers
//! resolve enum values directly.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ziwei_time::{Branch, EightChar, LunarMonth, Stem};

use crate::five_element::FiveElement;
use crate::horoscope::Gender;
use crate::palace::PalaceRole;
use crate::star::Star;
use crate::transformation::Transformation;

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "zh-Hant")]
    ZhHant,
}

pub const ALL_LOCALES: [Locale; 2] = [Locale::ZhCn, Locale::ZhHant];

impl Locale {
    pub const fn code(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::ZhHant => "zh-Hant",
        }
    }

    fn table(self) -> &'static Table {
        match self {
            Self::ZhCn => &ZH_CN,
            Self::ZhHant => &ZH_HANT,
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_LOCALES
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown locale '{s}' (expected zh-CN or zh-Hant)"))
    }
}

struct Table {
    gender: [&'static str; 2],
    yin_yang: [&'static str; 2],
    year: &'static str,
    age: &'static str,
    hour: &'static str,
    leap: &'static str,
    stems: [&'static str; 10],
    branches: [&'static str; 12],
    zodiac: [&'static str; 12],
    palaces: [&'static str; 12],
    horoscope: [&'static str; 12],
    star_names: [&'static str; 18],
    star_abbrs: [&'static str; 18],
    transformations: [&'static str; 4],
    five_elements: [&'static str; 5],
    months: [&'static str; 12],
}

const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const BRANCHES: [&str; 12] = ["子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥"];
const FIVE_ELEMENTS: [&str; 5] = ["木三局", "金四局", "水二局", "火六局", "土五局"];

static ZH_CN: Table = Table {
    gender: ["女", "男"],
    yin_yang: ["阴", "阳"],
    year: "年",
    age: "岁",
    hour: "时",
    leap: "闰",
    stems: STEMS,
    branches: BRANCHES,
    zodiac: ["鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪"],
    palaces: [
        "命宫", "兄弟", "夫妻", "子女", "财帛", "疾厄", "迁移", "交友", "官禄", "田宅", "福德", "父母",
    ],
    horoscope: [
        "大命", "大兄", "大夫", "大子", "大财", "大疾", "大迁", "大友", "大官", "大田", "大福", "大父",
    ],
    star_names: [
        "紫微", "天机", "太阳", "武曲", "天同", "廉贞", "天府", "太阴", "贪狼", "巨门", "天相", "天梁",
        "七杀", "破军", "左辅", "右弼", "文昌", "文曲",
    ],
    star_abbrs: [
        "紫", "机", "阳", "武", "同", "廉", "府", "阴", "贪", "巨", "相", "梁", "杀", "破", "左", "右",
        "昌", "曲",
    ],
    transformations: ["禄", "权", "科", "忌"],
    five_elements: FIVE_ELEMENTS,
    months: [
        "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "冬月", "腊月",
    ],
};

static ZH_HANT: Table = Table {
    gender: ["女", "男"],
    yin_yang: ["陰", "陽"],
    year: "年",
    age: "歲",
    hour: "時",
    leap: "閏",
    stems: STEMS,
    branches: BRANCHES,
    zodiac: ["鼠", "牛", "虎", "兔", "龍", "蛇", "馬", "羊", "猴", "雞", "狗", "豬"],
    palaces: [
        "命宮", "兄弟", "夫妻", "子女", "財帛", "疾厄", "遷移", "交友", "官祿", "田宅", "福德", "父母",
    ],
    horoscope: [
        "大命", "大兄", "大夫", "大子", "大財", "大疾", "大遷", "大友", "大官", "大田", "大福", "大父",
    ],
    star_names: [
        "紫微", "天機", "太陽", "武曲", "天同", "廉貞", "天府", "太陰", "貪狼", "巨門", "天相", "天梁",
        "七殺", "破軍", "左輔", "右弼", "文昌", "文曲",
    ],
    star_abbrs: [
        "紫", "機", "陽", "武", "同", "廉", "府", "陰", "貪", "巨", "相", "梁", "殺", "破", "左", "右",
        "昌", "曲",
    ],
    transformations: ["祿", "權", "科", "忌"],
    five_elements: FIVE_ELEMENTS,
    months: [
        "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "冬月", "臘月",
    ],
};

const DAY_TENS: [&str; 4] = ["初", "十", "廿", "三"];
const DIGITS: [&str; 10] = ["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

pub fn stem_name(locale: Locale, stem: Stem) -> &'static str {
    locale.table().stems[stem.index() as usize]
}

pub fn branch_name(locale: Locale, branch: Branch) -> &'static str {
    locale.table().branches[branch.index() as usize]
}

pub fn zodiac_name(locale: Locale, branch: Branch) -> &'static str {
    locale.table().zodiac[branch.index() as usize]
}

pub fn palace_name(locale: Locale, role: PalaceRole) -> &'static str {
    locale.table().palaces[role.index() as usize]
}

pub fn horoscope_palace_name(locale: Locale, role: PalaceRole) -> &'static str {
    locale.table().horoscope[role.index() as usize]
}

pub fn star_name(locale: Locale, star: Star) -> &'static str {
    locale.table().star_names[star.index() as usize]
}

pub fn star_abbr(locale: Locale, star: Star) -> &'static str {
    locale.table().star_abbrs[star.index() as usize]
}

pub fn transformation_name(locale: Locale, t: Transformation) -> &'static str {
    locale.table().transformations[t.index() as usize]
}

pub fn five_element_name(locale: Locale, fe: FiveElement) -> &'static str {
    locale.table().five_elements[fe.index() as usize]
}

pub fn gender_name(locale: Locale, gender: Gender) -> &'static str {
    locale.table().gender[gender.value() as usize]
}

/// 阴 or 阳 for a stem's polarity.
pub fn yin_yang_name(locale: Locale, stem: Stem) -> &'static str {
    locale.table().yin_yang[stem.is_yang() as usize]
}

/// Hour-branch label, e.g. `午时`.
pub fn hour_name(locale: Locale, hour_index: u8) -> String {
    let branch = locale.table().branches[(hour_index % 12) as usize];
    format!("{branch}{}", locale.table().hour)
}

/// Lunar month label, e.g. `正月` or `闰四月`.
pub fn month_name(locale: Locale, month: LunarMonth) -> String {
    let t = locale.table();
    let name = t.months[month.index() as usize];
    if month.leap {
        format!("{}{name}", t.leap)
    } else {
        name.to_string()
    }
}

/// Lunar day label, `初一` through `三十`.
pub fn day_name(day: u8) -> String {
    match day {
        10 => "初十".to_string(),
        20 => "二十".to_string(),
        30 => "三十".to_string(),
        _ => {
            let tens = DAY_TENS[(day / 10).min(3) as usize];
            format!("{tens}{}", DIGITS[(day % 10) as usize])
        }
    }
}

/// `<stem><branch>年<month><day> <hour>`, e.g. `甲辰年正月初一 午时`.
pub fn lunar_date_text(
    locale: Locale,
    stem: Stem,
    branch: Branch,
    month: LunarMonth,
    day: u8,
    hour_index: u8,
) -> String {
    let t = locale.table();
    format!(
        "{}{}{}{}{} {}",
        stem_name(locale, stem),
        branch_name(locale, branch),
        t.year,
        month_name(locale, month),
        day_name(day),
        hour_name(locale, hour_index)
    )
}

/// The four pillars separated by spaces, e.g. `庚午 戊寅 甲子 甲子`.
pub fn eight_char_text(locale: Locale, eight: &EightChar) -> String {
    eight
        .pillars()
        .iter()
        .map(|p| format!("{}{}", stem_name(locale, p.stem), branch_name(locale, p.branch)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `<year>年<age>岁`, the yearly label of a horoscope palace.
pub fn yearly_text(locale: Locale, year: i32, age: u16) -> String {
    let t = locale.table();
    format!("{year}{}{age}{}", t.year, t.age)
}

/// Resolve a dotted key. Unknown keys yield `None`.
pub fn translate(locale: Locale, key: &str) -> Option<&'static str> {
    let t = locale.table();
    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        ["year"] => Some(t.year),
        ["age"] => Some(t.age),
        ["hour"] => Some(t.hour),
        ["gender", g] => Gender::from_key(g).map(|g| gender_name(locale, g)),
        ["one", "yin"] => Some(t.yin_yang[0]),
        ["one", "yang"] => Some(t.yin_yang[1]),
        ["stem", s] => Stem::from_key(s).map(|s| stem_name(locale, s)),
        ["branch", b, "name"] => Branch::from_key(b).map(|b| branch_name(locale, b)),
        ["branch", b, "zodiac"] => Branch::from_key(b).map(|b| zodiac_name(locale, b)),
        ["palace", p, "name"] => PalaceRole::from_key(p).map(|r| palace_name(locale, r)),
        ["palace", p, "horoscope"] => {
            PalaceRole::from_key(p).map(|r| horoscope_palace_name(locale, r))
        }
        ["star", s, "name"] => Star::from_key(s).map(|s| star_name(locale, s)),
        ["star", s, "abbr"] => Star::from_key(s).map(|s| star_abbr(locale, s)),
        ["transformation", k] => Transformation::from_key(k).map(|x| transformation_name(locale, x)),
        ["fiveElement" | "fiveElementNum", k] => {
            FiveElement::from_key(k).map(|e| five_element_name(locale, e))
        }
        _ => None,
    }
}
