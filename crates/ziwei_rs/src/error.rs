//! Error type for the convenience API.

use std::error::Error;
use std::fmt::{Display, Formatter};

use ziwei_base::ChartError;
use ziwei_time::CalendarError;

/// Errors from the convenience entry points.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ZiweiError {
    /// Date conversion or normalization failed.
    Calendar(CalendarError),
    /// Chart assembly failed.
    Chart(ChartError),
    /// Input text could not be parsed.
    Parse(String),
}

impl Display for ZiweiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calendar(e) => write!(f, "calendar error: {e}"),
            Self::Chart(e) => write!(f, "chart error: {e}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl Error for ZiweiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Calendar(e) => Some(e),
            Self::Chart(e) => Some(e),
            Self::Parse(_) => None,
        }
    }
}

impl From<CalendarError> for ZiweiError {
    fn from(e: CalendarError) -> Self {
        Self::Calendar(e)
    }
}

impl From<ChartError> for ZiweiError {
    fn from(e: ChartError) -> Self {
        Self::Chart(e)
    }
}
