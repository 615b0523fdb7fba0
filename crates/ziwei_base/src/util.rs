//! Circular index arithmetic shared by every palace rule.

use crate::error::ChartError;

/// Number of palaces around a chart.
pub const PALACE_COUNT: usize = 12;

/// Wrap `index` into `[0, modulus)`.
///
/// Fails for a modulus of zero or less.
pub fn normalize(index: i32, modulus: i32) -> Result<i32, ChartError> {
    if modulus <= 0 {
        return Err(ChartError::InvalidModulus(modulus));
    }
    Ok(((index % modulus) + modulus) % modulus)
}

/// Wrap `index` onto the twelve palaces.
pub const fn palace_index(index: i32) -> u8 {
    index.rem_euclid(PALACE_COUNT as i32) as u8
}

/// The diametrically opposite palace.
pub const fn opposite(index: u8) -> u8 {
    palace_index(index as i32 + 6)
}

/// Reflection across the Yin-Shen axis, taking the Ziwei index to the
/// Tianfu index.
pub const fn mirror(index: u8) -> u8 {
    palace_index(12 - index as i32)
}

/// Reject palace-sized indices outside 0..12.
pub(crate) fn check_palace(index: u8) -> Result<u8, ChartError> {
    if (index as usize) < PALACE_COUNT {
        Ok(index)
    } else {
        Err(ChartError::InvalidPalaceIndex(index))
    }
}
