//! Star placement: the Ziwei/Tianfu anchors and the 18-star layout.

use serde::Serialize;
use ziwei_time::Branch;

use crate::error::ChartError;
use crate::five_element::FiveElement;
use crate::star::{Anchor, MAJOR_STAR_METAS, MINOR_STAR_METAS, Star, StarMeta, ZIWEI_GROUP_LEN};
use crate::util::{PALACE_COUNT, mirror, palace_index};

/// Palace indices of Ziwei and Tianfu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarAnchors {
    pub ziwei: u8,
    pub tianfu: u8,
}

/// Ziwei and Tianfu palace indices for a lunar day and bureau.
///
/// The day is padded up to the next multiple of the bureau number; the
/// quotient locates Ziwei, then the padding is walked forward when even
/// and backward when odd. Tianfu mirrors Ziwei across the Yin-Shen axis.
pub fn star_anchors(day: u8, five_element: FiveElement) -> Result<StarAnchors, ChartError> {
    if !(1..=30).contains(&day) {
        return Err(ChartError::InvalidDay(day));
    }
    let m = five_element.value() as i32;
    let day = day as i32;
    let offset = (m - day % m) % m;
    let quotient = ((day + offset) / m) % 12;
    let step = if offset % 2 == 0 { offset } else { -offset };
    let ziwei = palace_index(quotient - 1 + step);
    Ok(StarAnchors {
        ziwei,
        tianfu: mirror(ziwei),
    })
}

/// Palace indices of the four minor stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinorAnchors {
    pub zuo_fu: u8,
    pub you_bi: u8,
    pub wen_chang: u8,
    pub wen_qu: u8,
}

impl MinorAnchors {
    /// Index of one minor star; `None` for a major star.
    pub const fn of(&self, star: Star) -> Option<u8> {
        match star {
            Star::ZuoFu => Some(self.zuo_fu),
            Star::YouBi => Some(self.you_bi),
            Star::WenChang => Some(self.wen_chang),
            Star::WenQu => Some(self.wen_qu),
            _ => None,
        }
    }
}

/// Zuofu counts months forward from Chen, Youbi backward from Xu; Wenqu
/// counts hours forward from Chen, Wenchang backward from Xu.
pub fn minor_anchors(month_index: u8, hour_index: u8) -> Result<MinorAnchors, ChartError> {
    if month_index > 11 {
        return Err(ChartError::InvalidMonthIndex(month_index));
    }
    if hour_index > 11 {
        return Err(ChartError::InvalidHourIndex(hour_index));
    }
    let chen = Branch::Chen.index() as i32 - 2;
    let xu = Branch::Xu.index() as i32 - 2;
    let (month, hour) = (month_index as i32, hour_index as i32);
    Ok(MinorAnchors {
        zuo_fu: palace_index(chen + month),
        you_bi: palace_index(xu - month),
        wen_chang: palace_index(xu - hour),
        wen_qu: palace_index(chen + hour),
    })
}

/// Stars per palace, in placement order.
pub type StarLayout = [Vec<Star>; PALACE_COUNT];

/// Target palace of step `position` of the major walk.
fn major_target(meta: &StarMeta, position: usize, anchors: &StarAnchors) -> u8 {
    let (start, step) = match meta.anchor {
        Anchor::ZiWei => (anchors.ziwei, position),
        _ => (anchors.tianfu, position - ZIWEI_GROUP_LEN),
    };
    palace_index(start as i32 + meta.direction as i32 * step as i32)
}

/// Lay out the 14 major stars.
pub fn layout_major(anchors: &StarAnchors) -> StarLayout {
    let mut layout: StarLayout = Default::default();
    for (position, meta) in MAJOR_STAR_METAS.iter().enumerate() {
        if let Some(star) = meta.star {
            layout[major_target(meta, position, anchors) as usize].push(star);
        }
    }
    layout
}

/// Lay out the 4 minor stars, each at its own index.
pub fn layout_minor(anchors: &MinorAnchors) -> StarLayout {
    let mut layout: StarLayout = Default::default();
    for star in MINOR_STAR_METAS.iter().filter_map(|m| m.star) {
        if let Some(index) = anchors.of(star) {
            layout[index as usize].push(star);
        }
    }
    layout
}

/// Palace index of a placed star, if present.
pub fn find_star(layout: &StarLayout, star: Star) -> Option<u8> {
    layout.iter().position(|stars| stars.contains(&star)).map(|i| i as u8)
}
