//! Time-step labels of data-table value columns.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A value column label interpreted as a point on the time axis.
///
/// Annual outputs label columns `YYYY` (e.g. `1995`), monthly outputs
/// `YYYYMM` (e.g. `199501`). Anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeStep {
    Year(i32),
    Month { year: i32, month: u32 },
    Other(String),
}

impl TimeStep {
    /// Parse a column label.
    pub fn parse(label: &str) -> Self {
        let s = label.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            match s.len() {
                4 => {
                    if let Ok(year) = s.parse() {
                        return Self::Year(year);
                    }
                }
                6 => {
                    if let (Ok(year), Ok(month)) = (s[..4].parse(), s[4..].parse::<u32>()) {
                        if (1..=12).contains(&month) {
                            return Self::Month { year, month };
                        }
                    }
                }
                _ => {}
            }
        }
        Self::Other(label.to_string())
    }

    /// First day covered by this time step, when the label is a date.
    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Year(year) => NaiveDate::from_ymd_opt(*year, 1, 1),
            Self::Month { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1),
            Self::Other(_) => None,
        }
    }
}

impl fmt::Display for TimeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{:04}", year),
            Self::Month { year, month } => write!(f, "{:04}{:02}", year, month),
            Self::Other(label) => write!(f, "{}", label),
        }
    }
}
