//! Chart timeframe definitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Bar granularity a chart is drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1-minute bars.
    #[default]
    #[serde(rename = "1m", alias = "1M", alias = "m1")]
    Minute1,
    /// 5-minute bars.
    #[serde(rename = "5m", alias = "5M", alias = "m5")]
    Minute5,
    /// Daily bars, rolled up from the intraday series.
    #[serde(rename = "d", alias = "D", alias = "d1")]
    Day1,
}

impl Timeframe {
    /// Returns the bar length in minutes, or None for daily bars.
    #[must_use]
    pub const fn minutes(&self) -> Option<u32> {
        match self {
            Self::Minute1 => Some(1),
            Self::Minute5 => Some(5),
            Self::Day1 => None,
        }
    }

    /// Returns true if bars must be rolled up into trading days.
    #[must_use]
    pub const fn is_daily(&self) -> bool {
        matches!(self, Self::Day1)
    }

    /// Returns the short label used in output file names.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Minute1 => "1M",
            Self::Minute5 => "5M",
            Self::Day1 => "D",
        }
    }

    /// Returns the default chart title for this timeframe.
    #[must_use]
    pub const fn chart_title(&self) -> &'static str {
        match self {
            Self::Minute1 => "1-Minute Candlestick",
            Self::Minute5 => "5-Minute Candlestick",
            Self::Day1 => "Daily Candlestick",
        }
    }

    /// Returns all available timeframes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Minute1, Self::Minute5, Self::Day1]
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = TimeframeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "m1" | "1min" | "minute" | "minute1" => Ok(Self::Minute1),
            "5m" | "m5" | "5min" | "minute5" => Ok(Self::Minute5),
            "d" | "d1" | "1d" | "day" | "daily" => Ok(Self::Day1),
            _ => Err(TimeframeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid timeframe string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeframeParseError(String);

impl std::fmt::Display for TimeframeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid timeframe '{}', expected one of: 1m, 5m, d",
            self.0
        )
    }
}

impl std::error::Error for TimeframeParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("1M".parse::<Timeframe>().unwrap(), Timeframe::Minute1);
        assert_eq!("5m".parse::<Timeframe>().unwrap(), Timeframe::Minute5);
        assert_eq!("D".parse::<Timeframe>().unwrap(), Timeframe::Day1);
        assert!("h1".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_timeframe_labels() {
        assert_eq!(Timeframe::Minute5.label(), "5M");
        assert_eq!(Timeframe::Day1.to_string(), "D");
        assert_eq!(Timeframe::Minute1.minutes(), Some(1));
        assert!(Timeframe::Day1.is_daily());
        assert_eq!(Timeframe::Day1.minutes(), None);
    }

    #[test]
    fn test_timeframe_serde() {
        let tf: Timeframe = serde_json::from_str("\"D\"").unwrap();
        assert_eq!(tf, Timeframe::Day1);
        assert_eq!(serde_json::to_string(&Timeframe::Minute5).unwrap(), "\"5m\"");
    }
}
