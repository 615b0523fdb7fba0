//! Five-element bureau (五行局) of the life palace.
//!
//! The bureau follows the Nayin element of the life palace's stem/branch
//! pair and fixes the divisor used to place the Ziwei star, as well as the
//! first age of the major-period table.

use serde::{Deserialize, Serialize};
use ziwei_time::{Branch, Stem};

/// The five bureaus, in the order produced by the Nayin reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FiveElement {
    Wood,
    Metal,
    Water,
    Fire,
    Earth,
}

pub const ALL_FIVE_ELEMENTS: [FiveElement; 5] = [
    FiveElement::Wood,
    FiveElement::Metal,
    FiveElement::Water,
    FiveElement::Fire,
    FiveElement::Earth,
];

impl FiveElement {
    /// Bureau number: Water 2, Wood 3, Metal 4, Earth 5, Fire 6.
    ///
    /// Label tables list the bureaus by key as WOOD, METAL, WATER, EARTH,
    /// FIRE, i.e. 3, 4, 2, 5, 6. Only the names come from that order; the
    /// Nayin index (see [`five_element`]) swaps the last two, so index 3
    /// is Fire and index 4 is Earth.
    pub const fn value(self) -> u8 {
        match self {
            Self::Wood => 3,
            Self::Metal => 4,
            Self::Water => 2,
            Self::Fire => 6,
            Self::Earth => 5,
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Wood => "WOOD",
            Self::Metal => "METAL",
            Self::Water => "WATER",
            Self::Fire => "FIRE",
            Self::Earth => "EARTH",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_FIVE_ELEMENTS.into_iter().find(|e| e.key() == key)
    }

    /// Bureau with the given number, if any.
    pub fn from_value(value: u8) -> Option<Self> {
        ALL_FIVE_ELEMENTS.into_iter().find(|e| e.value() == value)
    }
}

/// Bureau of a stem/branch pair.
///
/// Stems count in pairs (Jia-Yi = 1 .. Ren-Gui = 5), branches in pairs of
/// the 6-cycle (Zi-Chou/Wu-Wei = 1, Yin-Mao/Shen-You = 2, Chen-Si/Xu-Hai = 3).
pub fn five_element(stem: Stem, branch: Branch) -> FiveElement {
    let stem_number = stem.index() / 2 + 1;
    let branch_number = (branch.index() % 6) / 2 + 1;
    ALL_FIVE_ELEMENTS[((stem_number + branch_number - 1) % 5) as usize]
}
