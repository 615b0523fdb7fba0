//! The four transformations (四化) and self-transformation.

use serde::{Deserialize, Serialize};
use ziwei_time::Stem;

use crate::star::Star;

/// Lu (禄), Quan (权), Ke (科), Ji (忌), in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transformation {
    #[serde(rename = "A")]
    Lu,
    #[serde(rename = "B")]
    Quan,
    #[serde(rename = "C")]
    Ke,
    #[serde(rename = "D")]
    Ji,
}

pub const ALL_TRANSFORMATIONS: [Transformation; 4] = [
    Transformation::Lu,
    Transformation::Quan,
    Transformation::Ke,
    Transformation::Ji,
];

impl Transformation {
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Localization key (`A`..`D`).
    pub const fn key(self) -> &'static str {
        match self {
            Self::Lu => "A",
            Self::Quan => "B",
            Self::Ke => "C",
            Self::Ji => "D",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_TRANSFORMATIONS.into_iter().find(|t| t.key() == key)
    }
}

/// Stars transformed by each stem, indexed by stem then by transformation.
pub const STEM_TRANSFORMATIONS: [[Star; 4]; 10] = {
    use Star::*;
    [
        [LianZhen, PoJun, WuQu, TaiYang],
        [TianJi, TianLiang, ZiWei, TaiYin],
        [TianTong, TianJi, WenChang, LianZhen],
        [TaiYin, TianTong, TianJi, JuMen],
        [TanLang, TaiYin, YouBi, TianJi],
        [WuQu, TanLang, TianLiang, WenQu],
        [TaiYang, WuQu, TaiYin, TianTong],
        [JuMen, TaiYang, WuQu, WenChang],
        [TianLiang, ZiWei, ZuoFu, WuQu],
        [PoJun, JuMen, TaiYin, TanLang],
    ]
};

/// The four stars a stem transforms, in Lu, Quan, Ke, Ji order.
pub const fn transformed_stars(stem: Stem) -> [Star; 4] {
    STEM_TRANSFORMATIONS[stem.index() as usize]
}

/// Transformation a stem imposes on a star, if any.
pub fn transformation_of(stem: Stem, star: Star) -> Option<Transformation> {
    transformed_stars(stem)
        .iter()
        .position(|&s| s == star)
        .map(|i| ALL_TRANSFORMATIONS[i])
}

/// Direction of a self-transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelfTransformationKind {
    /// 离心, from the palace's own stem.
    #[serde(rename = "CF")]
    Centrifugal,
    /// 向心, from the opposite palace's stem.
    #[serde(rename = "CP")]
    Centripetal,
}

/// Self-transformations of a star within its palace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SelfTransformations {
    #[serde(rename = "CF", skip_serializing_if = "Option::is_none")]
    pub centrifugal: Option<Transformation>,
    #[serde(rename = "CP", skip_serializing_if = "Option::is_none")]
    pub centripetal: Option<Transformation>,
}

impl SelfTransformations {
    /// Evaluate both directions for `star` in a palace with `own_stem`,
    /// facing a palace with `opposite_stem`.
    pub fn of(star: Star, own_stem: Stem, opposite_stem: Stem) -> Self {
        Self {
            centrifugal: transformation_of(own_stem, star),
            centripetal: transformation_of(opposite_stem, star),
        }
    }

    pub const fn get(&self, kind: SelfTransformationKind) -> Option<Transformation> {
        match kind {
            SelfTransformationKind::Centrifugal => self.centrifugal,
            SelfTransformationKind::Centripetal => self.centripetal,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.centrifugal.is_none() && self.centripetal.is_none()
    }
}
