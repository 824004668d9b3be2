//! Lookback periods offered by the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Trailing window over which price history is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LookbackPeriod {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    FiveYears,
}

/// Returned when a period code is not one of `1mo, 3mo, 6mo, 1y, 5y`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown lookback period '{0}' (expected one of 1mo, 3mo, 6mo, 1y, 5y)")]
pub struct ParsePeriodError(pub String);

impl LookbackPeriod {
    /// All periods in selector order.
    pub const ALL: [LookbackPeriod; 5] = [
        LookbackPeriod::OneMonth,
        LookbackPeriod::ThreeMonths,
        LookbackPeriod::SixMonths,
        LookbackPeriod::OneYear,
        LookbackPeriod::FiveYears,
    ];

    /// Provider range code (`1mo`, `3mo`, ...).
    pub fn code(self) -> &'static str {
        match self {
            LookbackPeriod::OneMonth => "1mo",
            LookbackPeriod::ThreeMonths => "3mo",
            LookbackPeriod::SixMonths => "6mo",
            LookbackPeriod::OneYear => "1y",
            LookbackPeriod::FiveYears => "5y",
        }
    }

    pub fn index(self) -> usize {
        match self {
            LookbackPeriod::OneMonth => 0,
            LookbackPeriod::ThreeMonths => 1,
            LookbackPeriod::SixMonths => 2,
            LookbackPeriod::OneYear => 3,
            LookbackPeriod::FiveYears => 4,
        }
    }

    pub fn next(self) -> LookbackPeriod {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> LookbackPeriod {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for LookbackPeriod {
    fn default() -> Self {
        LookbackPeriod::OneYear
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LookbackPeriod {
    type Err = ParsePeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or(ParsePeriodError(s.to_string()))
    }
}

impl TryFrom<String> for LookbackPeriod {
    type Error = ParsePeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LookbackPeriod> for String {
    fn from(p: LookbackPeriod) -> Self {
        p.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip_through_from_str() {
        for p in LookbackPeriod::ALL {
            assert_eq!(p.code().parse::<LookbackPeriod>().unwrap(), p);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("1Y".parse::<LookbackPeriod>().unwrap(), LookbackPeriod::OneYear);
        assert_eq!(" 3MO ".parse::<LookbackPeriod>().unwrap(), LookbackPeriod::ThreeMonths);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = "2w".parse::<LookbackPeriod>().unwrap_err();
        assert!(err.to_string().contains("2w"));
    }

    #[test]
    fn default_is_one_year() {
        assert_eq!(LookbackPeriod::default(), LookbackPeriod::OneYear);
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(LookbackPeriod::FiveYears.next(), LookbackPeriod::OneMonth);
        assert_eq!(LookbackPeriod::OneMonth.prev(), LookbackPeriod::FiveYears);
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&LookbackPeriod::SixMonths).unwrap();
        assert_eq!(json, "\"6mo\"");
        let back: LookbackPeriod = serde_json::from_str("\"5y\"").unwrap();
        assert_eq!(back, LookbackPeriod::FiveYears);
    }
}
