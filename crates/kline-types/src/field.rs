//! Named bar fields.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A named column of a bar series.
///
/// Every bar type exposes its values through [`Bar::value`](crate::Bar::value),
/// so callers can select columns by name without knowing the concrete bar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// `YYYYMMDD` date.
    Date,
    /// `HHMM` time of day.
    Time,
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Lowest price.
    Low,
    /// Closing price.
    Close,
    /// Traded volume.
    Volume,
}

impl Field {
    /// Returns the column name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }

    /// Returns true for price fields.
    #[must_use]
    pub const fn is_price(&self) -> bool {
        matches!(self, Self::Open | Self::High | Self::Low | Self::Close)
    }

    /// Returns all fields.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Date,
            Self::Time,
            Self::Open,
            Self::High,
            Self::Low,
            Self::Close,
            Self::Volume,
        ]
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "open" => Ok(Self::Open),
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            "close" => Ok(Self::Close),
            "volume" | "volumn" | "vol" => Ok(Self::Volume),
            _ => Err(FieldParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldParseError(String);

impl std::fmt::Display for FieldParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown field '{}', expected one of: date, time, open, high, low, close, volume",
            self.0
        )
    }
}

impl std::error::Error for FieldParseError {}
