//! Heavenly stems, earthly branches and the sexagenary year.
//!
//! Stems cycle with period 10 and branches with period 12; together they
//! label a 60-year cycle. The epoch is CE 4 = Jia-Zi (stem 0, branch 0).

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// The ten heavenly stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// All 10 stems in order (index 0 = Jia).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

impl Stem {
    /// 0-based index (Jia=0 .. Gui=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at a 0-based index, if in range.
    pub fn from_index(index: u8) -> Option<Self> {
        ALL_STEMS.get(index as usize).copied()
    }

    /// Stable key used for localization lookups.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Jia => "JIA",
            Self::Yi => "YI",
            Self::Bing => "BING",
            Self::Ding => "DING",
            Self::Wu => "WU",
            Self::Ji => "JI",
            Self::Geng => "GENG",
            Self::Xin => "XIN",
            Self::Ren => "REN",
            Self::Gui => "GUI",
        }
    }

    /// Stem for a stable key.
    pub fn from_key(key: &str) -> Option<Self> {
        ALL_STEMS.iter().copied().find(|s| s.key() == key)
    }

    /// Yang stems sit at even indices.
    pub const fn is_yang(self) -> bool {
        self.index() % 2 == 0
    }
}

/// The twelve earthly branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

/// All 12 branches in order (index 0 = Zi).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

impl Branch {
    /// 0-based index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at a 0-based index, if in range.
    pub fn from_index(index: u8) -> Option<Self> {
        ALL_BRANCHES.get(index as usize).copied()
    }

    /// Stable key used for localization lookups.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Zi => "ZI",
            Self::Chou => "CHOU",
            Self::Yin => "YIN",
            Self::Mao => "MAO",
            Self::Chen => "CHEN",
            Self::Si => "SI",
            Self::Wu => "WU",
            Self::Wei => "WEI",
            Self::Shen => "SHEN",
            Self::You => "YOU",
            Self::Xu => "XU",
            Self::Hai => "HAI",
        }
    }

    /// Branch for a stable key.
    pub fn from_key(key: &str) -> Option<Self> {
        ALL_BRANCHES.iter().copied().find(|b| b.key() == key)
    }
}

/// A (stem, branch) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sexagenary {
    pub stem: Stem,
    pub branch: Branch,
}

impl Sexagenary {
    /// Pair at a position in the 60-cycle (taken modulo 60).
    pub const fn from_cycle_index(index: u8) -> Self {
        let index = index % 60;
        Self {
            stem: ALL_STEMS[(index % 10) as usize],
            branch: ALL_BRANCHES[(index % 12) as usize],
        }
    }

    /// The pair `n` steps later in the cycle (earlier for negative `n`).
    pub fn offset(self, n: i64) -> Self {
        Self::from_cycle_index((i64::from(self.cycle_index()) + n).rem_euclid(60) as u8)
    }

    /// Position in the 60-cycle (0 = Jia-Zi).
    pub fn cycle_index(self) -> u8 {
        let (s, b) = (self.stem.index() as i16, self.branch.index() as i16);
        // Solve x ≡ s (mod 10), x ≡ b (mod 12); only same-parity pairs are valid.
        ((6 * s - 5 * b).rem_euclid(60)) as u8
    }
}

/// First calendar year the sexagenary mapping accepts.
pub const MIN_YEAR: i32 = 1;
/// Last calendar year the sexagenary mapping accepts.
pub const MAX_YEAR: i32 = 9999;

/// Sexagenary (stem, branch) pair of a lunar year.
///
/// Years outside [1, 9999] are rejected, never clamped.
pub fn sexagenary_from_year(year: i32) -> Result<Sexagenary, CalendarError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CalendarError::YearOutOfRange(year));
    }
    let stem = ALL_STEMS[(year - 4).rem_euclid(10) as usize];
    let branch = ALL_BRANCHES[(year - 4).rem_euclid(12) as usize];
    Ok(Sexagenary { stem, branch })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, s) in ALL_STEMS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
        }
        for (i, b) in ALL_BRANCHES.iter().enumerate() {
            assert_eq!(b.index() as usize, i);
        }
    }

    #[test]
    fn keys_roundtrip() {
        for s in ALL_STEMS {
            assert_eq!(Stem::from_key(s.key()), Some(s));
        }
        for b in ALL_BRANCHES {
            assert_eq!(Branch::from_key(b.key()), Some(b));
        }
        assert_eq!(Stem::from_key("ZI"), None);
    }

    #[test]
    fn year_2024_is_jia_chen() {
        let p = sexagenary_from_year(2024).unwrap();
        assert_eq!((p.stem.index(), p.branch.index()), (0, 4));
    }

    #[test]
    fn year_1900_is_geng_zi() {
        let p = sexagenary_from_year(1900).unwrap();
        assert_eq!((p.stem, p.branch), (Stem::Geng, Branch::Zi));
    }

    #[test]
    fn range_edges() {
        let first = sexagenary_from_year(1).unwrap();
        assert_eq!((first.stem.index(), first.branch.index()), (7, 9));
        let last = sexagenary_from_year(9999).unwrap();
        assert_eq!((last.stem.index(), last.branch.index()), (5, 11));
    }

    #[test]
    fn out_of_range_rejected() {
        assert_eq!(sexagenary_from_year(0), Err(CalendarError::YearOutOfRange(0)));
        assert_eq!(
            sexagenary_from_year(10000),
            Err(CalendarError::YearOutOfRange(10000))
        );
    }

    #[test]
    fn period_sixty() {
        for y in (1..=9939).step_by(37) {
            assert_eq!(sexagenary_from_year(y), sexagenary_from_year(y + 60));
        }
    }

    #[test]
    fn cycle_index_matches_year_offset() {
        for y in 1984..2044 {
            let p = sexagenary_from_year(y).unwrap();
            assert_eq!(p.cycle_index() as i32, (y - 1984).rem_euclid(60));
        }
    }

    #[test]
    fn cycle_index_inverts() {
        for i in 0..60 {
            assert_eq!(Sexagenary::from_cycle_index(i).cycle_index(), i);
        }
        let gui_hai = Sexagenary::from_cycle_index(59);
        assert_eq!((gui_hai.stem, gui_hai.branch), (Stem::Gui, Branch::Hai));
        assert_eq!(gui_hai.offset(1), Sexagenary::from_cycle_index(0));
        assert_eq!(Sexagenary::from_cycle_index(0).offset(-1), gui_hai);
    }

    #[test]
    fn yang_stems() {
        assert!(Stem::Jia.is_yang());
        assert!(!Stem::Yi.is_yang());
        assert!(Stem::Ren.is_yang());
    }
}
