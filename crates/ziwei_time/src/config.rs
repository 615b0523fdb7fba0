//! Division policies controlling how an ambiguous birth date is resolved.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Where the lunar year starts for the year pillar.
///
/// Read and carried through configuration; the palace pipeline derives the
/// year stem/branch from the lunar year number either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearDivision {
    /// Year starts at the lunar new year.
    #[default]
    Normal,
    /// Year starts at the Start of Spring solar term.
    Spring,
}

/// How a leap month is folded into a regular month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthDivision {
    /// First half belongs to the previous month, second half to the next.
    #[default]
    Normal,
    /// Always the month before the leap month.
    Last,
    /// Always the month after the leap month.
    Next,
}

/// Whether 23:00-23:59 belongs to the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayDivision {
    /// The day changes at 23:00.
    #[default]
    Normal,
    /// The day changes at midnight.
    Current,
}

macro_rules! option_enum {
    ($ty:ident, $label:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok(Self::$variant),)+
                    other => Err(format!("unknown {} '{other}'", $label)),
                }
            }
        }
    };
}

option_enum!(YearDivision, "year-division", { Normal => "normal", Spring => "spring" });
option_enum!(MonthDivision, "month-division", { Normal => "normal", Last => "last", Next => "next" });
option_enum!(DayDivision, "day-division", { Normal => "normal", Current => "current" });

/// Option key for [`YearDivision`].
pub const YEAR_DIVISION_KEY: &str = "year-division";
/// Option key for [`MonthDivision`].
pub const MONTH_DIVISION_KEY: &str = "month-division";
/// Option key for [`DayDivision`].
pub const DAY_DIVISION_KEY: &str = "day-division";

/// Policy read by the birth-date normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    pub year_division: YearDivision,
    pub month_division: MonthDivision,
    pub day_division: DayDivision,
}

impl ChartConfig {
    /// Apply `(key, value)` overrides one by one.
    ///
    /// Unknown keys and unparseable values are skipped, leaving that option
    /// at its previous value. Returns the rejected pairs.
    pub fn apply_overrides<'a>(&mut self, pairs: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
        let mut rejected = Vec::new();
        for &(key, value) in pairs {
            let applied = match key {
                YEAR_DIVISION_KEY => value.parse().map(|v| self.year_division = v),
                MONTH_DIVISION_KEY => value.parse().map(|v| self.month_division = v),
                DAY_DIVISION_KEY => value.parse().map(|v| self.day_division = v),
                _ => Err(format!("unknown option '{key}'")),
            };
            if let Err(reason) = applied {
                warn!(key, value, %reason, "config override rejected");
                rejected.push((key, value));
            }
        }
        rejected
    }

    /// The options as `(key, value)` pairs, in a stable order.
    pub fn entries(&self) -> [(&'static str, &'static str); 3] {
        [
            (YEAR_DIVISION_KEY, self.year_division.name()),
            (MONTH_DIVISION_KEY, self.month_division.name()),
            (DAY_DIVISION_KEY, self.day_division.name()),
        ]
    }
}
