//! Human-readable rendering of show start times.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::FyyurError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayFormat {
    /// `Thursday June, 15, 2023 at 10:30AM`
    Full,
    /// `Thu 06, 15, 2023 10:30AM`
    #[default]
    Medium,
}

impl DisplayFormat {
    fn pattern(self) -> &'static str {
        match self {
            DisplayFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
            DisplayFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        }
    }
}

impl FromStr for DisplayFormat {
    type Err = FyyurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(DisplayFormat::Full),
            "medium" => Ok(DisplayFormat::Medium),
            other => Err(FyyurError::InvalidInput(format!(
                "unknown display format '{other}', expected 'full' or 'medium'"
            ))),
        }
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayFormat::Full => f.write_str("full"),
            DisplayFormat::Medium => f.write_str("medium"),
        }
    }
}

/// Render `instant` in English using the given display format.
pub fn format_show_time(instant: &DateTime<Utc>, format: DisplayFormat) -> String {
    instant.format(format.pattern()).to_string()
}
