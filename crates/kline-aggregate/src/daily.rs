//! Session-close daily aggregation.

use kline_types::{DailyBar, IntradayBar, OrderingError, SESSION_CLOSE};
use tracing::{debug, trace, warn};

/// Streaming intraday-to-daily aggregator.
///
/// A run of bars is closed by the first bar whose time equals the
/// session-close marker. Whatever run is still open when the input ends is
/// closed by [`finish`](Self::finish).
///
/// Runs are delimited by the marker alone, not by date equality: a marker in
/// the middle of a date closes the run there, and the remaining bars of that
/// date form a new run attributed to the same date.
#[derive(Debug)]
pub struct DailyAggregator {
    session_close: u32,
    current: Option<DailyBarBuilder>,
    last_closed_date: Option<u32>,
}

impl Default for DailyAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyAggregator {
    /// Creates an aggregator using the standard `1500` session close.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_session_close(SESSION_CLOSE)
    }

    /// Creates an aggregator with a custom session-close time (`HHMM`).
    #[must_use]
    pub const fn with_session_close(session_close: u32) -> Self {
        Self {
            session_close,
            current: None,
            last_closed_date: None,
        }
    }

    /// Returns the session-close time this aggregator splits on.
    #[must_use]
    pub const fn session_close(&self) -> u32 {
        self.session_close
    }

    /// Processes a bar, potentially emitting a completed day.
    ///
    /// Returns `Some(day)` when `bar` carries the session-close marker,
    /// `None` otherwise.
    pub fn push(&mut self, bar: &IntradayBar) -> Option<DailyBar> {
        let builder = match self.current.take() {
            Some(mut builder) => {
                if builder.date != bar.date {
                    warn!(
                        run_date = builder.date,
                        date = bar.date,
                        "run crosses a date boundary without a session close"
                    );
                }
                builder.update(bar);
                builder
            }
            None => {
                if self.last_closed_date == Some(bar.date) {
                    warn!(
                        date = bar.date,
                        time = bar.time,
                        "bars follow a session close on the same date; starting a new run"
                    );
                }
                DailyBarBuilder::new(bar)
            }
        };

        if bar.time == self.session_close {
            let day = builder.finish();
            trace!(date = day.date, bars = day.bar_count, "session closed");
            self.last_closed_date = Some(day.date);
            Some(day)
        } else {
            self.current = Some(builder);
            None
        }
    }

    /// Finishes aggregation, returning any run left open at end of data.
    #[must_use]
    pub fn finish(self) -> Option<DailyBar> {
        self.current.map(|builder| {
            let day = builder.finish();
            trace!(date = day.date, bars = day.bar_count, "end of data closed run");
            day
        })
    }
}

/// Builder for one daily bar.
#[derive(Debug)]
struct DailyBarBuilder {
    date: u32,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    bar_count: u32,
}

impl DailyBarBuilder {
    /// Starts a run from its first bar.
    const fn new(bar: &IntradayBar) -> Self {
        Self {
            date: bar.date,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            bar_count: 1,
        }
    }

    /// Folds the next bar of the run.
    fn update(&mut self, bar: &IntradayBar) {
        self.high = self.high.max(bar.high);
        self.low = self.low.min(bar.low);
        self.close = bar.close;
        self.volume += bar.volume;
        self.bar_count += 1;
    }

    const fn finish(self) -> DailyBar {
        DailyBar::new(
            self.date,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
            self.bar_count,
        )
    }
}

/// Rolls an ascending intraday series into daily bars.
///
/// The series is not sorted or validated; see [`try_aggregate_daily`] for the
/// checked form. Empty input yields an empty result.
#[must_use]
pub fn aggregate_daily(bars: &[IntradayBar]) -> Vec<DailyBar> {
    let mut aggregator = DailyAggregator::new();
    let mut days: Vec<DailyBar> = bars.iter().filter_map(|bar| aggregator.push(bar)).collect();
    days.extend(aggregator.finish());

    debug!(bars = bars.len(), days = days.len(), "aggregated daily bars");
    days
}

/// Rolls an intraday series into daily bars after checking its order.
///
/// # Errors
///
/// Returns an error naming the first bar whose `(date, time)` does not
/// strictly follow its predecessor.
pub fn try_aggregate_daily(bars: &[IntradayBar]) -> Result<Vec<DailyBar>, OrderingError> {
    check_order(bars)?;
    Ok(aggregate_daily(bars))
}

/// Checks that `(date, time)` strictly increases across the series.
///
/// # Errors
///
/// Returns an error for the first decreasing or repeated stamp.
pub fn check_order(bars: &[IntradayBar]) -> Result<(), OrderingError> {
    match bars.windows(2).position(|pair| pair[0].key() >= pair[1].key()) {
        Some(i) => Err(OrderingError {
            index: i + 1,
            previous_date: bars[i].date,
            previous_time: bars[i].time,
            current_date: bars[i + 1].date,
            current_time: bars[i + 1].time,
        }),
        None => Ok(()),
    }
}
