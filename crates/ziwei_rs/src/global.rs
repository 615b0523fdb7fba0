//! Process-wide default settings.
//!
//! One writer at a time, many readers. Entry points copy a [`Settings`]
//! snapshot when they start, so a concurrent update is never observed
//! halfway through a calculation.

use std::sync::{PoisonError, RwLock};

use tracing::info;
use ziwei_base::Locale;
use ziwei_time::{ChartConfig, DayDivision, MonthDivision, YearDivision};

/// Division policy plus display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    pub config: ChartConfig,
    pub locale: Locale,
}

static SETTINGS: RwLock<Settings> = RwLock::new(Settings {
    config: ChartConfig {
        year_division: YearDivision::Normal,
        month_division: MonthDivision::Normal,
        day_division: DayDivision::Normal,
    },
    locale: Locale::ZhCn,
});

/// Snapshot of the current settings.
pub fn settings() -> Settings {
    *SETTINGS.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_config(config: ChartConfig) {
    SETTINGS.write().unwrap_or_else(PoisonError::into_inner).config = config;
}

pub fn set_locale(locale: Locale) {
    info!(%locale, "default locale changed");
    SETTINGS.write().unwrap_or_else(PoisonError::into_inner).locale = locale;
}

/// Apply `(key, value)` overrides to the global policy. Returns the
/// rejected pairs; every other key is updated.
pub fn apply_overrides<'a>(pairs: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
    let mut guard = SETTINGS.write().unwrap_or_else(PoisonError::into_inner);
    guard.config.apply_overrides(pairs)
}

/// Restore the built-in defaults.
pub fn reset() {
    *SETTINGS.write().unwrap_or_else(PoisonError::into_inner) = Settings::default();
}
