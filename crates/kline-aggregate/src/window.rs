//! Chart window selection.

use kline_types::{Bar, ChartRequest, WindowError};
use tracing::debug;

/// Selects the contiguous slice of `bars` a chart request covers.
///
/// Without a time range the window runs from the first bar dated
/// `start_date` to the last bar dated `end_date`. With one, it runs from the
/// bar stamped `(start_date, start_time)` to the bar stamped
/// `(end_date, end_time)`. Anchors must match exactly.
///
/// # Errors
///
/// Returns an error if an anchor is missing or the end precedes the start.
pub fn select_window<'a, B: Bar>(
    bars: &'a [B],
    request: &ChartRequest,
) -> Result<&'a [B], WindowError> {
    let (start_date, end_date) = (request.start_date, request.end_date);

    let (start, end) = match request.time_range() {
        Some((start_time, end_time)) => {
            let start = bars
                .iter()
                .position(|b| b.date() == start_date && b.time() == Some(start_time))
                .ok_or(WindowError::StartNotFound {
                    date: start_date,
                    time: Some(start_time),
                })?;
            let end = bars
                .iter()
                .position(|b| b.date() == end_date && b.time() == Some(end_time))
                .ok_or(WindowError::EndNotFound {
                    date: end_date,
                    time: Some(end_time),
                })?;
            (start, end)
        }
        None => {
            let start = bars
                .iter()
                .position(|b| b.date() == start_date)
                .ok_or(WindowError::StartNotFound {
                    date: start_date,
                    time: None,
                })?;
            let end = bars
                .iter()
                .rposition(|b| b.date() == end_date)
                .ok_or(WindowError::EndNotFound {
                    date: end_date,
                    time: None,
                })?;
            (start, end)
        }
    };

    if end < start {
        return Err(WindowError::Inverted { start, end });
    }

    debug!(start, end, "selected chart window");
    Ok(&bars[start..=end])
}
