//! Intraday-to-daily OHLCV aggregation for the kline candlestick toolkit.
//!
//! This crate provides:
//!
//! - [`aggregate_daily`] - One-pass session-close aggregation over a slice
//! - [`try_aggregate_daily`] - The same, after checking ascending order
//! - [`DailyAggregator`] - Streaming form of the aggregation
//! - [`select_window`] - Chart window selection over any bar series

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/kline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod daily;
mod window;

pub use daily::{DailyAggregator, aggregate_daily, check_order, try_aggregate_daily};
pub use window::select_window;
