//! Error types for kline.

use thiserror::Error;

/// Result type alias for kline operations.
pub type Result<T> = std::result::Result<T, KlineError>;

/// Errors that can occur while ingesting, aggregating, or rendering bars.
#[derive(Error, Debug)]
pub enum KlineError {
    /// Malformed combined timestamp.
    #[error(transparent)]
    Stamp(#[from] StampError),

    /// Input bars are not in ascending `(date, time)` order.
    #[error(transparent)]
    Ordering(#[from] OrderingError),

    /// Invalid chart request.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Requested window is not present in the data.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// Invalid data format.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No bars were available for the requested operation.
    #[error("No data available for {0}")]
    NoDataAvailable(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format error.
    #[error("Format error: {0}")]
    Format(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error for combined `YYYYMMDDHHMM[SS]` timestamps that cannot be split.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StampError {
    /// The stamp contains something other than ASCII digits.
    #[error("Invalid timestamp '{0}': expected only digits")]
    NonDigit(String),

    /// The stamp has the wrong number of digits.
    #[error("Invalid timestamp '{stamp}': expected 12 or 14 digits, got {len}")]
    InvalidLength {
        /// The offending stamp.
        stamp: String,
        /// Its digit count.
        len: usize,
    },
}

/// Error raised when a bar series is not strictly ascending.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error(
    "Bars out of order at index {index}: {current_date} {current_time} does not follow {previous_date} {previous_time}"
)]
pub struct OrderingError {
    /// Index of the first bar that breaks the ordering.
    pub index: usize,
    /// Date of the preceding bar.
    pub previous_date: u32,
    /// Time of the preceding bar.
    pub previous_time: u32,
    /// Date of the offending bar.
    pub current_date: u32,
    /// Time of the offending bar.
    pub current_time: u32,
}

/// Error for chart requests that cannot be satisfied by construction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// Start date is after end date.
    #[error("Invalid date range: {start} > {end}")]
    InvalidDateRange {
        /// The start date.
        start: u32,
        /// The end date.
        end: u32,
    },

    /// Only one of start time / end time was given.
    #[error("Start time and end time must be given together")]
    PartialTimeRange,

    /// Start point is after end point on the same date.
    #[error("Invalid time range on {date}: {start} > {end}")]
    InvalidTimeRange {
        /// The shared date.
        date: u32,
        /// The start time.
        start: u32,
        /// The end time.
        end: u32,
    },

    /// Time is not a valid `HHMM` value.
    #[error("Invalid time of day: {0} (expected HHMM)")]
    InvalidTime(u32),
}

/// Error for window selections whose anchors are missing from a series.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// No bar matches the start anchor.
    #[error("No bar found at start {date}{}", fmt_time(.time))]
    StartNotFound {
        /// Anchor date.
        date: u32,
        /// Anchor time, if the window is time-bounded.
        time: Option<u32>,
    },

    /// No bar matches the end anchor.
    #[error("No bar found at end {date}{}", fmt_time(.time))]
    EndNotFound {
        /// Anchor date.
        date: u32,
        /// Anchor time, if the window is time-bounded.
        time: Option<u32>,
    },

    /// The end anchor precedes the start anchor in the series.
    #[error("Window end (index {end}) precedes start (index {start})")]
    Inverted {
        /// Index of the start anchor.
        start: usize,
        /// Index of the end anchor.
        end: usize,
    },
}

fn fmt_time(time: &Option<u32>) -> String {
    time.map(|t| format!(" {t:04}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_error_display() {
        let err = WindowError::StartNotFound {
            date: 20240102,
            time: Some(931),
        };
        assert_eq!(err.to_string(), "No bar found at start 20240102 0931");

        let err = WindowError::EndNotFound {
            date: 20240103,
            time: None,
        };
        assert_eq!(err.to_string(), "No bar found at end 20240103");
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: KlineError = StampError::NonDigit("2024-01-02".into()).into();
        assert!(matches!(err, KlineError::Stamp(_)));
    }
}
