//! Intraday-to-daily candlestick aggregation and chart rendering.
//!
//! This is a facade crate that re-exports functionality from the kline
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use kline_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let bars = read_bars_from_path("rb_1m.csv", IngestConfig::default()).await?;
//!     let days = try_aggregate_daily(&bars)?;
//!
//!     CsvFormatter::new().write_daily(&days, std::io::stdout())?;
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use kline_types::*;

// Re-export ingestion
#[cfg(feature = "ingest")]
pub use kline_ingest::{
    ColumnMap, IngestConfig, IngestError, bar_stream, parse_record, read_bars,
    read_bars_from_path,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use kline_aggregate::{
    DailyAggregator, aggregate_daily, check_order, select_window, try_aggregate_daily,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use kline_format::{
    ChartPage, ChartTemplate, ChartWriter, CsvFormatter, FormatError, Formatter, JsonFormatter,
    JsonStyle, OutputFormat, TemplateError,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use kline_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use kline_lib::prelude::*;
/// ```
pub mod prelude {
    pub use kline_types::{
        Bar, ChartModel, ChartRequest, DailyBar, Field, IntradayBar, KlineError, Result,
        SESSION_CLOSE, Stamp, Timeframe,
    };

    #[cfg(feature = "ingest")]
    pub use kline_ingest::{IngestConfig, bar_stream, read_bars, read_bars_from_path};

    #[cfg(feature = "aggregate")]
    pub use kline_aggregate::{
        DailyAggregator, aggregate_daily, select_window, try_aggregate_daily,
    };

    #[cfg(feature = "format")]
    pub use kline_format::{
        ChartPage, ChartTemplate, ChartWriter, CsvFormatter, Formatter, JsonFormatter,
        OutputFormat,
    };

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use kline_format::ParquetFormatter;
}
