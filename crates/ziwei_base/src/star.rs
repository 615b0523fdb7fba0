//! Star identities and their fixed placement tables.

use serde::{Deserialize, Serialize};

/// The 14 major and 4 minor stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Star {
    ZiWei,
    TianJi,
    TaiYang,
    WuQu,
    TianTong,
    LianZhen,
    TianFu,
    TaiYin,
    TanLang,
    JuMen,
    TianXiang,
    TianLiang,
    QiSha,
    PoJun,
    ZuoFu,
    YouBi,
    WenChang,
    WenQu,
}

/// All 18 stars, majors first.
pub const ALL_STARS: [Star; 18] = [
    Star::ZiWei,
    Star::TianJi,
    Star::TaiYang,
    Star::WuQu,
    Star::TianTong,
    Star::LianZhen,
    Star::TianFu,
    Star::TaiYin,
    Star::TanLang,
    Star::JuMen,
    Star::TianXiang,
    Star::TianLiang,
    Star::QiSha,
    Star::PoJun,
    Star::ZuoFu,
    Star::YouBi,
    Star::WenChang,
    Star::WenQu,
];

/// Major or minor tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarKind {
    Major,
    Minor,
}

/// Star group (北斗 north, 南斗 south, 中天 central).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Galaxy {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "C")]
    Central,
}

impl Galaxy {
    pub const fn key(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::South => "S",
            Self::Central => "C",
        }
    }
}

impl Star {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::ZiWei => "ZI_WEI",
            Self::TianJi => "TIAN_JI",
            Self::TaiYang => "TAI_YANG",
            Self::WuQu => "WU_QU",
            Self::TianTong => "TIAN_TONG",
            Self::LianZhen => "LIAN_ZHEN",
            Self::TianFu => "TIAN_FU",
            Self::TaiYin => "TAI_YIN",
            Self::TanLang => "TAN_LANG",
            Self::JuMen => "JU_MEN",
            Self::TianXiang => "TIAN_XIANG",
            Self::TianLiang => "TIAN_LIANG",
            Self::QiSha => "QI_SHA",
            Self::PoJun => "PO_JUN",
            Self::ZuoFu => "ZUO_FU",
            Self::YouBi => "YOU_BI",
            Self::WenChang => "WEN_CHANG",
            Self::WenQu => "WEN_QU",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_STARS.into_iter().find(|s| s.key() == key)
    }

    pub const fn kind(self) -> StarKind {
        match self {
            Self::ZuoFu | Self::YouBi | Self::WenChang | Self::WenQu => StarKind::Minor,
            _ => StarKind::Major,
        }
    }

    /// Placement rule of this star.
    pub const fn meta(self) -> StarMeta {
        match self {
            Self::ZiWei => MAJOR_STAR_METAS[0],
            Self::TianJi => MAJOR_STAR_METAS[1],
            Self::TaiYang => MAJOR_STAR_METAS[3],
            Self::WuQu => MAJOR_STAR_METAS[4],
            Self::TianTong => MAJOR_STAR_METAS[5],
            Self::LianZhen => MAJOR_STAR_METAS[8],
            Self::TianFu => MAJOR_STAR_METAS[9],
            Self::TaiYin => MAJOR_STAR_METAS[10],
            Self::TanLang => MAJOR_STAR_METAS[11],
            Self::JuMen => MAJOR_STAR_METAS[12],
            Self::TianXiang => MAJOR_STAR_METAS[13],
            Self::TianLiang => MAJOR_STAR_METAS[14],
            Self::QiSha => MAJOR_STAR_METAS[15],
            Self::PoJun => MAJOR_STAR_METAS[19],
            Self::ZuoFu => MINOR_STAR_METAS[0],
            Self::YouBi => MINOR_STAR_METAS[1],
            Self::WenChang => MINOR_STAR_METAS[2],
            Self::WenQu => MINOR_STAR_METAS[3],
        }
    }

    pub const fn galaxy(self) -> Option<Galaxy> {
        self.meta().galaxy
    }

    pub const fn all() -> &'static [Star; 18] {
        &ALL_STARS
    }
}

/// Where a placement walk starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    ZiWei,
    TianFu,
    /// Minor stars each have their own month- or hour-derived index.
    Own,
}

/// One step of a placement walk. Entries without a star are gaps that
/// still advance the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarMeta {
    pub star: Option<Star>,
    pub anchor: Anchor,
    /// +1 forward through the palaces, -1 backward.
    pub direction: i8,
    pub galaxy: Option<Galaxy>,
}

const fn meta(star: Option<Star>, anchor: Anchor, direction: i8, galaxy: Option<Galaxy>) -> StarMeta {
    StarMeta {
        star,
        anchor,
        direction,
        galaxy,
    }
}

/// Entries anchored at the Ziwei index; the rest anchor at Tianfu.
pub const ZIWEI_GROUP_LEN: usize = 9;

/// The 20-step major-star walk: 9 steps backward from Ziwei, then 11
/// forward from Tianfu.
pub const MAJOR_STAR_METAS: [StarMeta; 20] = {
    use Anchor::{TianFu as F, ZiWei as Z};
    use Galaxy::{Central as C, North as N, South as S};
    [
        meta(Some(Star::ZiWei), Z, -1, Some(C)),
        meta(Some(Star::TianJi), Z, -1, Some(N)),
        meta(None, Z, -1, None),
        meta(Some(Star::TaiYang), Z, -1, Some(N)),
        meta(Some(Star::WuQu), Z, -1, Some(N)),
        meta(Some(Star::TianTong), Z, -1, Some(N)),
        meta(None, Z, -1, None),
        meta(None, Z, -1, None),
        meta(Some(Star::LianZhen), Z, -1, Some(N)),
        meta(Some(Star::TianFu), F, 1, None),
        meta(Some(Star::TaiYin), F, 1, Some(S)),
        meta(Some(Star::TanLang), F, 1, Some(S)),
        meta(Some(Star::JuMen), F, 1, Some(S)),
        meta(Some(Star::TianXiang), F, 1, None),
        meta(Some(Star::TianLiang), F, 1, Some(S)),
        meta(Some(Star::QiSha), F, 1, None),
        meta(None, F, 1, None),
        meta(None, F, 1, None),
        meta(None, F, 1, None),
        meta(Some(Star::PoJun), F, 1, Some(S)),
    ]
};

/// Minor stars, each placed directly at its own index.
pub const MINOR_STAR_METAS: [StarMeta; 4] = [
    meta(Some(Star::ZuoFu), Anchor::Own, 1, Some(Galaxy::Central)),
    meta(Some(Star::YouBi), Anchor::Own, -1, Some(Galaxy::Central)),
    meta(Some(Star::WenChang), Anchor::Own, -1, Some(Galaxy::Central)),
    meta(Some(Star::WenQu), Anchor::Own, 1, Some(Galaxy::Central)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_walk_has_fourteen_stars() {
        let stars = MAJOR_STAR_METAS.iter().filter(|m| m.star.is_some()).count();
        assert_eq!(stars, 14);
        assert_eq!(MAJOR_STAR_METAS.len() - stars, 6);
        assert!(
            MAJOR_STAR_METAS
                .iter()
                .filter_map(|m| m.star)
                .all(|s| s.kind() == StarKind::Major)
        );
    }

    #[test]
    fn groups_split_at_nine() {
        assert!(MAJOR_STAR_METAS[..ZIWEI_GROUP_LEN].iter().all(|m| m.anchor == Anchor::ZiWei));
        assert!(MAJOR_STAR_METAS[ZIWEI_GROUP_LEN..].iter().all(|m| m.anchor == Anchor::TianFu));
    }

    #[test]
    fn every_star_has_a_meta() {
        for s in Star::all() {
            assert_eq!(s.meta().star, Some(*s));
        }
        assert_eq!(Star::ZiWei.galaxy(), Some(Galaxy::Central));
        assert_eq!(Star::TianFu.galaxy(), None);
        assert_eq!(Star::PoJun.galaxy(), Some(Galaxy::South));
    }

    #[test]
    fn keys_roundtrip() {
        for s in Star::all() {
            assert_eq!(Star::from_key(s.key()), Some(*s));
        }
        assert_eq!(Star::from_key("LU_CUN"), None);
    }
}
