//! Chart models and chart requests.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Field, KlineError, RequestError, Timeframe};

/// Which columns a chart record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ChartModel {
    /// Candles only: open, close, low, high.
    #[default]
    #[serde(alias = "model1")]
    Candle,
    /// Candles with a volume column.
    #[serde(alias = "model2")]
    CandleVolume,
}

impl ChartModel {
    /// Returns the fields emitted per bar, in chart order.
    #[must_use]
    pub const fn fields(&self) -> &'static [Field] {
        match self {
            Self::Candle => &[Field::Open, Field::Close, Field::Low, Field::High],
            Self::CandleVolume => &[
                Field::Open,
                Field::Close,
                Field::Low,
                Field::High,
                Field::Volume,
            ],
        }
    }

    /// Returns the model identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Candle => "candle",
            Self::CandleVolume => "candle-volume",
        }
    }
}

impl std::fmt::Display for ChartModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartModel {
    type Err = KlineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "candle" | "model1" => Ok(Self::Candle),
            "candle-volume" | "volume" | "model2" => Ok(Self::CandleVolume),
            _ => Err(KlineError::Parse(format!(
                "unknown chart model '{s}', expected candle or candle-volume"
            ))),
        }
    }
}

/// Everything needed to produce one chart, fixed before any work starts.
///
/// Times are ignored for daily charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Instrument symbol, upper-cased.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Chart timeframe.
    #[serde(default)]
    pub timeframe: Timeframe,
    /// Chart model.
    #[serde(default)]
    pub model: ChartModel,
    /// First date of the window (`YYYYMMDD`).
    pub start_date: u32,
    /// Last date of the window (`YYYYMMDD`).
    pub end_date: u32,
    /// Time of the first bar (`HHMM`).
    #[serde(default)]
    pub start_time: Option<u32>,
    /// Time of the last bar (`HHMM`).
    #[serde(default)]
    pub end_time: Option<u32>,
}

impl ChartRequest {
    /// Creates a date-bounded request.
    ///
    /// # Errors
    ///
    /// Returns an error if start_date > end_date.
    pub fn new(
        timeframe: Timeframe,
        model: ChartModel,
        start_date: u32,
        end_date: u32,
    ) -> Result<Self, RequestError> {
        let request = Self {
            symbol: None,
            timeframe,
            model,
            start_date,
            end_date,
            start_time: None,
            end_time: None,
        };
        request.validate()?;
        Ok(request)
    }

    /// Bounds the request by time of day on the start and end dates.
    ///
    /// # Errors
    ///
    /// Returns an error if either time is not `HHMM` or the start point falls
    /// after the end point.
    pub fn with_times(mut self, start_time: u32, end_time: u32) -> Result<Self, RequestError> {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self.validate()?;
        Ok(self)
    }

    /// Sets the instrument symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into().to_uppercase());
        self
    }

    /// Parses and validates a request from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the request is invalid.
    pub fn from_json(json: &str) -> Result<Self, KlineError> {
        let mut request: Self = serde_json::from_str(json)?;
        request.symbol = request.symbol.map(|s| s.to_uppercase());
        request.validate()?;
        Ok(request)
    }

    /// Checks the request invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.start_date > self.end_date {
            return Err(RequestError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        match (self.start_time, self.end_time) {
            (None, None) => Ok(()),
            (Some(start), Some(end)) => {
                for time in [start, end] {
                    if time > 2359 || time % 100 > 59 {
                        return Err(RequestError::InvalidTime(time));
                    }
                }
                if self.start_date == self.end_date && start > end {
                    return Err(RequestError::InvalidTimeRange {
                        date: self.start_date,
                        start,
                        end,
                    });
                }
                Ok(())
            }
            _ => Err(RequestError::PartialTimeRange),
        }
    }

    /// Returns the `(start, end)` times if the window is time-bounded.
    ///
    /// Always `None` for daily charts.
    #[must_use]
    pub const fn time_range(&self) -> Option<(u32, u32)> {
        if self.timeframe.is_daily() {
            return None;
        }
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Returns the chart title.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.symbol {
            Some(symbol) => format!("{symbol} {}", self.timeframe.chart_title()),
            None => self.timeframe.chart_title().to_string(),
        }
    }

    /// Returns the base name shared by the chart's output files.
    #[must_use]
    pub fn save_name(&self) -> String {
        match self.time_range() {
            Some((start, end)) => {
                format!("{}{start}-{}{end}", self.start_date, self.end_date)
            }
            None => format!("{}-{}", self.start_date, self.end_date),
        }
    }

    /// Returns the chart record file name.
    #[must_use]
    pub fn data_file_name(&self) -> String {
        format!("{}({}).txt", self.save_name(), self.timeframe.label())
    }

    /// Returns the rendered chart page file name.
    #[must_use]
    pub fn page_file_name(&self) -> String {
        format!("{}({}).html", self.save_name(), self.timeframe.label())
    }
}
