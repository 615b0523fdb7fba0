//! Eight characters (four pillars) of a civil instant.
//!
//! - Year: changes at Lichun, when the Sun reaches 315° ecliptic longitude.
//! - Month: changes at each jie term, every 30° from Lichun; the stem
//!   follows the year stem (five-tiger rule).
//! - Day: counted in the sexagenary cycle from the fixed day number. A
//!   birth at 23:xx already takes the next day's pillar.
//! - Hour: branch from the two-hour slot, stem from the day stem
//!   (five-rat rule).
//!
//! Clock times are China standard time (UTC+8). The Sun's longitude comes
//! from the low-precision solar theory (about 0.01°, a quarter hour near a
//! term boundary).

use serde::Serialize;

use crate::error::CalendarError;
use crate::normalize::{fold_hour_index, hour_index};
use crate::sexagenary::{ALL_BRANCHES, ALL_STEMS, Sexagenary, sexagenary_from_year};
use crate::solar_time::SolarTime;

/// Offset of China standard time from UTC, in hours.
const CST_OFFSET_HOURS: f64 = 8.0;
/// Julian date at the start of fixed day 0.
const RD_EPOCH_JD: f64 = 1_721_424.5;
/// J2000.0 epoch.
const J2000: f64 = 2_451_545.0;
/// Sun longitude at Lichun, the first jie of the year.
const LICHUN_DEG: f64 = 315.0;
/// Day-cycle index of fixed day 0.
const DAY_CYCLE_EPOCH: i64 = 14;
/// Stem index of the Yin month, by year stem modulo 5.
const FIVE_TIGERS: [u8; 5] = [2, 4, 6, 8, 0];
/// Stem index of the Zi hour, by day stem modulo 5.
const FIVE_RATS: [u8; 5] = [0, 2, 4, 6, 8];

/// The four pillars of a birth instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EightChar {
    pub year: Sexagenary,
    pub month: Sexagenary,
    pub day: Sexagenary,
    pub hour: Sexagenary,
}

impl EightChar {
    /// Pillars of a civil instant.
    pub fn of(solar: &SolarTime) -> Result<Self, CalendarError> {
        let (hour, minute, second) = solar.clock()?;
        let fixed = solar.rata_die()?;
        let clock = f64::from(hour) + f64::from(minute) / 60.0 + f64::from(second) / 3600.0;
        let jd = fixed as f64 + RD_EPOCH_JD + (clock - CST_OFFSET_HOURS) / 24.0;
        let lon = sun_longitude(jd);

        // Jan and Feb before Lichun still belong to the previous year.
        let before_lichun = solar.month <= 2 && (270.0..LICHUN_DEG).contains(&lon);
        let year = sexagenary_from_year(if before_lichun { solar.year - 1 } else { solar.year })?;

        let terms = (((lon - LICHUN_DEG).rem_euclid(360.0) / 30.0) as u8).min(11);
        let month = Sexagenary {
            stem: ALL_STEMS[usize::from((FIVE_TIGERS[usize::from(year.stem.index() % 5)] + terms) % 10)],
            branch: ALL_BRANCHES[usize::from((2 + terms) % 12)],
        };

        let day_index = (fixed + DAY_CYCLE_EPOCH).rem_euclid(60) as u8;
        let mut day = Sexagenary::from_cycle_index(day_index);
        if hour == 23 {
            day = day.offset(1);
        }

        let slot = fold_hour_index(hour_index(hour)?);
        let hour_pillar = Sexagenary {
            stem: ALL_STEMS[usize::from((FIVE_RATS[usize::from(day.stem.index() % 5)] + slot) % 10)],
            branch: ALL_BRANCHES[usize::from(slot)],
        };

        Ok(Self {
            year,
            month,
            day,
            hour: hour_pillar,
        })
    }

    /// Year, month, day and hour pillars in order.
    pub const fn pillars(&self) -> [Sexagenary; 4] {
        [self.year, self.month, self.day, self.hour]
    }
}

/// Apparent geometric longitude of the Sun in degrees, `[0, 360)`.
fn sun_longitude(jd: f64) -> f64 {
    let t = (jd - J2000) / 36_525.0;
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();
    (l0 + center - 0.005_69 - 0.004_78 * omega.sin()).rem_euclid(360.0)
}
