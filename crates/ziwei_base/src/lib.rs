//! ZiWei Dou Shu chart rules on top of normalized lunar birth data.
//!
//! This crate provides:
//! - Palace stems, branches and roles, and the five-element bureau
//! - Placement of the 14 major and 4 minor stars
//! - Birth-year, flying and self transformations
//! - Ten-year major periods and the horoscope view
//! - Localized labels in simplified and traditional Chinese
//!
//! Palace indices run 0..12 starting at Yin (寅); index 10 is Zi and 11 is
//! Chou. All functions are pure; [`build_chart`] assembles the pieces.

pub mod chart;
pub mod error;
pub mod five_element;
pub mod horoscope;
pub mod locale;
pub mod palace;
pub mod placement;
pub mod star;
pub mod transformation;
pub mod util;

pub use chart::{Chart, ChartInput, HOUR_RANGES, Palace, PlacedStar, build_chart};
pub use error::ChartError;
pub use five_element::{ALL_FIVE_ELEMENTS, FiveElement, five_element};
pub use horoscope::{
    AgeRange, Gender, Horoscope, HoroscopeAnchor, HoroscopePalace, period_direction,
    period_ranges, resolve_period,
};
pub use locale::{ALL_LOCALES, Locale, translate};
pub use palace::{
    ALL_PALACE_ROLES, PalaceRole, branch_palace_index, main_palace_index, palace_branch,
    palace_role, palace_stem_branches,
};
pub use placement::{
    MinorAnchors, StarAnchors, StarLayout, find_star, layout_major, layout_minor, minor_anchors,
    star_anchors,
};
pub use star::{ALL_STARS, Galaxy, Star, StarKind};
pub use transformation::{
    ALL_TRANSFORMATIONS, SelfTransformationKind, SelfTransformations, Transformation,
    transformation_of, transformed_stars,
};
pub use util::{PALACE_COUNT, mirror, normalize, opposite, palace_index};
