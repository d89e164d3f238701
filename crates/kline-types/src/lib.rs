//! Core types for the kline candlestick toolkit.
//!
//! This crate provides the fundamental data structures used throughout kline:
//!
//! - [`IntradayBar`] - One intraday OHLCV observation keyed by `(date, time)`
//! - [`DailyBar`] - One trading-day summary rolled up from intraday bars
//! - [`Bar`] and [`Field`] - Column access by name across bar types
//! - [`Stamp`] - Combined `YYYYMMDDHHMM[SS]` timestamp split
//! - [`Timeframe`], [`ChartModel`], [`ChartRequest`] - Chart configuration

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod chart;
mod error;
mod field;
mod stamp;
mod timeframe;

pub use bar::{Bar, DailyBar, IntradayBar, SESSION_CLOSE};
pub use chart::{ChartModel, ChartRequest};
pub use error::{KlineError, OrderingError, RequestError, Result, StampError, WindowError};
pub use field::{Field, FieldParseError};
pub use stamp::{Stamp, naive_date, naive_datetime};
pub use timeframe::{Timeframe, TimeframeParseError};
