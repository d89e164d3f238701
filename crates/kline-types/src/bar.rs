//! Intraday and daily bar representations.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{Field, stamp};

/// Session-close marker: the `HHMM` time that ends a trading day.
pub const SESSION_CLOSE: u32 = 1500;

/// Common access to the columns of a bar.
pub trait Bar {
    /// Returns the `YYYYMMDD` date.
    fn date(&self) -> u32;

    /// Returns the `HHMM` time, or `None` for bars spanning a whole day.
    fn time(&self) -> Option<u32>;

    /// Returns the value of a field as `f64`, or `None` if the bar lacks it.
    fn value(&self, field: Field) -> Option<f64>;
}

/// One price observation at a fixed intraday granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntradayBar {
    /// Calendar date as `YYYYMMDD`.
    pub date: u32,
    /// Time of day as `HHMM`.
    pub time: u32,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl IntradayBar {
    /// Creates a new intraday bar.
    #[must_use]
    pub const fn new(
        date: u32,
        time: u32,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            date,
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns the `(date, time)` ordering key.
    #[must_use]
    pub const fn key(&self) -> (u32, u32) {
        (self.date, self.time)
    }

    /// Returns true if this bar carries the session-close marker.
    #[must_use]
    pub const fn is_session_close(&self) -> bool {
        self.time == SESSION_CLOSE
    }

    /// Returns the bar's calendar timestamp, if date and time are valid.
    #[must_use]
    pub fn naive_datetime(&self) -> Option<NaiveDateTime> {
        stamp::naive_datetime(self.date, self.time)
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

impl Bar for IntradayBar {
    fn date(&self) -> u32 {
        self.date
    }

    fn time(&self) -> Option<u32> {
        Some(self.time)
    }

    fn value(&self, field: Field) -> Option<f64> {
        Some(match field {
            Field::Date => f64::from(self.date),
            Field::Time => f64::from(self.time),
            Field::Open => self.open,
            Field::High => self.high,
            Field::Low => self.low,
            Field::Close => self.close,
            Field::Volume => self.volume,
        })
    }
}

/// One aggregated trading-day summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// Date of the first intraday bar in the run.
    pub date: u32,
    /// Opening price (first bar's open).
    pub open: f64,
    /// Highest high over the run.
    pub high: f64,
    /// Lowest low over the run.
    pub low: f64,
    /// Closing price (last bar's close).
    pub close: f64,
    /// Total volume over the run.
    pub volume: f64,
    /// Number of intraday bars in the run.
    pub bar_count: u32,
}

impl DailyBar {
    /// Creates a new daily bar.
    #[must_use]
    pub const fn new(
        date: u32,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        bar_count: u32,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            bar_count,
        }
    }

    /// Returns the bar's calendar date, if valid.
    #[must_use]
    pub fn naive_date(&self) -> Option<NaiveDate> {
        stamp::naive_date(self.date)
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if this is a bullish (rising) day.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (falling) day.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }
}

impl Bar for DailyBar {
    fn date(&self) -> u32 {
        self.date
    }

    fn time(&self) -> Option<u32> {
        None
    }

    fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Date => Some(f64::from(self.date)),
            Field::Time => None,
            Field::Open => Some(self.open),
            Field::High => Some(self.high),
            Field::Low => Some(self.low),
            Field::Close => Some(self.close),
            Field::Volume => Some(self.volume),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_session_close() {
        let bar = IntradayBar::new(20240102, 1500, 11.0, 13.0, 10.0, 12.0, 200.0);
        assert!(bar.is_session_close());
        assert_eq!(bar.key(), (20240102, 1500));
        assert_relative_eq!(bar.range(), 3.0);
    }

    #[test]
    fn test_intraday_values() {
        let bar = IntradayBar::new(20240102, 931, 10.0, 12.0, 9.0, 11.0, 100.0);
        assert_eq!(bar.value(Field::Open), Some(10.0));
        assert_eq!(bar.value(Field::Low), Some(9.0));
        assert_eq!(bar.value(Field::Time), Some(931.0));
        assert_eq!(Bar::time(&bar), Some(931));
    }

    #[test]
    fn test_daily_values() {
        let bar = DailyBar::new(20240102, 10.0, 13.0, 9.0, 12.0, 300.0, 2);
        assert_eq!(bar.value(Field::Time), None);
        assert_eq!(bar.value(Field::Volume), Some(300.0));
        assert_eq!(Bar::time(&bar), None);
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
        assert_relative_eq!(bar.body(), 2.0);
    }

    #[test]
    fn test_calendar_conversion() {
        let bar = DailyBar::new(20240229, 1.0, 1.0, 1.0, 1.0, 0.0, 1);
        assert!(bar.naive_date().is_some());

        let bar = IntradayBar::new(20230229, 931, 1.0, 1.0, 1.0, 1.0, 0.0);
        assert!(bar.naive_datetime().is_none());
    }
}
