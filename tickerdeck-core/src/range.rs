//! TimeRange — the seven selectable chart windows and their Yahoo mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Chart time window. Each range implies its sampling interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    Day,
    FiveDays,
    Month,
    SixMonths,
    Year,
    FiveYears,
    All,
}

impl TimeRange {
    pub const ALL_RANGES: [TimeRange; 7] = [
        TimeRange::Day,
        TimeRange::FiveDays,
        TimeRange::Month,
        TimeRange::SixMonths,
        TimeRange::Year,
        TimeRange::FiveYears,
        TimeRange::All,
    ];

    /// Yahoo chart API `range` parameter.
    pub fn period(self) -> &'static str {
        match self {
            TimeRange::Day => "1d",
            TimeRange::FiveDays => "5d",
            TimeRange::Month => "1mo",
            TimeRange::SixMonths => "6mo",
            TimeRange::Year => "1y",
            TimeRange::FiveYears => "5y",
            TimeRange::All => "max",
        }
    }

    /// Yahoo chart API `interval` parameter, implied by the period.
    pub fn interval(self) -> &'static str {
        match self {
            TimeRange::Day => "5m",
            TimeRange::FiveDays => "15m",
            TimeRange::Month => "1d",
            TimeRange::SixMonths => "1d",
            TimeRange::Year => "1d",
            TimeRange::FiveYears => "1wk",
            TimeRange::All => "1mo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Day => "1D",
            TimeRange::FiveDays => "5D",
            TimeRange::Month => "1M",
            TimeRange::SixMonths => "6M",
            TimeRange::Year => "1Y",
            TimeRange::FiveYears => "5Y",
            TimeRange::All => "ALL",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL_RANGES.iter().position(|r| *r == self).unwrap_or(0)
    }

    pub fn next(self) -> TimeRange {
        Self::ALL_RANGES[(self.index() + 1) % Self::ALL_RANGES.len()]
    }

    pub fn prev(self) -> TimeRange {
        let n = Self::ALL_RANGES.len();
        Self::ALL_RANGES[(self.index() + n - 1) % n]
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Day
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "1D" => Ok(TimeRange::Day),
            "5D" => Ok(TimeRange::FiveDays),
            "1M" => Ok(TimeRange::Month),
            "6M" => Ok(TimeRange::SixMonths),
            "1Y" => Ok(TimeRange::Year),
            "5Y" => Ok(TimeRange::FiveYears),
            "ALL" | "MAX" => Ok(TimeRange::All),
            other => Err(format!(
                "unknown time range '{other}' (expected 1D, 5D, 1M, 6M, 1Y, 5Y or ALL)"
            )),
        }
    }
}
