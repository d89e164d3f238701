//! CSV ingestion of intraday bars for the kline candlestick toolkit.
//!
//! This crate provides the input side of the pipeline:
//!
//! - [`ColumnMap`] - Header resolution by field name
//! - [`parse_record`] - Row to [`IntradayBar`](kline_types::IntradayBar) conversion
//! - [`bar_stream`] - Async streaming reader
//! - [`read_bars`] / [`read_bars_from_path`] - Collect a whole file

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod reader;
mod record;

pub use error::IngestError;
pub use reader::{IngestConfig, bar_stream, read_bars, read_bars_from_path};
pub use record::{ColumnMap, parse_record};

/// Re-exported so callers of [`parse_record`] need not depend on `csv-async`.
pub use csv_async::StringRecord;
