//! The twelve palaces: intrinsic stem/branch pairs, life-palace location
//! and palace roles.
//!
//! Palace index 0 is the Yin (Tiger) branch; indices advance with the
//! branches, so index `i` sits on branch `(i + 2) mod 12`.

use serde::{Deserialize, Serialize};
use ziwei_time::{ALL_BRANCHES, ALL_STEMS, Branch, Stem};

use crate::error::ChartError;
use crate::util::palace_index;

/// The twelve palace roles, counted from the life palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PalaceRole {
    /// 命宫, life.
    Ming,
    /// 兄弟, siblings.
    XiongDi,
    /// 夫妻, spouse.
    FuQi,
    /// 子女, children.
    ZiNv,
    /// 财帛, wealth.
    CaiBo,
    /// 疾厄, health.
    JiE,
    /// 迁移, travel.
    QianYi,
    /// 交友, friends.
    JiaoYou,
    /// 官禄, career.
    GuanLu,
    /// 田宅, property.
    TianZhai,
    /// 福德, fortune.
    FuDe,
    /// 父母, parents.
    FuMu,
}

/// All 12 roles in order (0 = Ming).
pub const ALL_PALACE_ROLES: [PalaceRole; 12] = [
    PalaceRole::Ming,
    PalaceRole::XiongDi,
    PalaceRole::FuQi,
    PalaceRole::ZiNv,
    PalaceRole::CaiBo,
    PalaceRole::JiE,
    PalaceRole::QianYi,
    PalaceRole::JiaoYou,
    PalaceRole::GuanLu,
    PalaceRole::TianZhai,
    PalaceRole::FuDe,
    PalaceRole::FuMu,
];

impl PalaceRole {
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Role at a 0-based index, wrapping.
    pub const fn from_index(index: u8) -> Self {
        ALL_PALACE_ROLES[(index % 12) as usize]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Ming => "MING",
            Self::XiongDi => "XIONG_DI",
            Self::FuQi => "FU_QI",
            Self::ZiNv => "ZI_NV",
            Self::CaiBo => "CAI_BO",
            Self::JiE => "JI_E",
            Self::QianYi => "QIAN_YI",
            Self::JiaoYou => "JIAO_YOU",
            Self::GuanLu => "GUAN_LU",
            Self::TianZhai => "TIAN_ZHAI",
            Self::FuDe => "FU_DE",
            Self::FuMu => "FU_MU",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_PALACE_ROLES.into_iter().find(|r| r.key() == key)
    }

    pub const fn all() -> &'static [PalaceRole; 12] {
        &ALL_PALACE_ROLES
    }
}

/// Start stem of the first month, keyed by `year stem mod 5` (five tigers).
const FIVE_TIGER_START: [u8; 5] = [2, 4, 6, 8, 0];

/// Stem/branch pairs of the twelve palaces for a birth-year stem.
///
/// Index 0 is the Yin month; Jia and Ji years start at Bing-Yin, Yi and
/// Geng years at Wu-Yin, and so on.
pub fn palace_stem_branches(year_stem: Stem) -> [(Stem, Branch); 12] {
    let start = FIVE_TIGER_START[(year_stem.index() % 5) as usize] as usize;
    std::array::from_fn(|i| (ALL_STEMS[(start + i) % 10], ALL_BRANCHES[(2 + i) % 12]))
}

/// Branch of a palace index.
pub const fn palace_branch(index: u8) -> Branch {
    ALL_BRANCHES[((index as usize) + 2) % 12]
}

/// Palace index holding a branch.
pub const fn branch_palace_index(branch: Branch) -> u8 {
    palace_index(branch.index() as i32 - 2)
}

/// Life palace: count months forward from Yin, then hours backward.
pub fn main_palace_index(month_index: u8, hour_index: u8) -> Result<u8, ChartError> {
    if month_index > 11 {
        return Err(ChartError::InvalidMonthIndex(month_index));
    }
    if hour_index > 11 {
        return Err(ChartError::InvalidHourIndex(hour_index));
    }
    Ok(palace_index(month_index as i32 - hour_index as i32))
}

/// Role index of palace `index` given the life palace. Roles run against
/// the palace order.
pub const fn role_index(main_palace: u8, index: u8) -> u8 {
    palace_index(main_palace as i32 - index as i32)
}

/// Role of palace `index` given the life palace.
pub const fn palace_role(main_palace: u8, index: u8) -> PalaceRole {
    PalaceRole::from_index(role_index(main_palace, index))
}

/// Origin (lai-yin) palace: its stem equals the birth-year stem and it does
/// not sit on Zi or Chou.
pub fn is_origin_palace(year_stem: Stem, palace_stem: Stem, palace_branch: Branch) -> bool {
    year_stem == palace_stem && !matches!(palace_branch, Branch::Zi | Branch::Chou)
}
