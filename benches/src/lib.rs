//! Synthetic intraday series for kline benchmarks.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use kline_lib::IntradayBar;

/// Trading minutes of one session: 09:01-11:30 and 13:31-15:00.
pub fn session_times() -> Vec<u32> {
    let minutes = |from: u32, to: u32| (from..=to).map(|m| (m / 60) * 100 + m % 60);
    minutes(9 * 60 + 1, 11 * 60 + 30)
        .chain(minutes(13 * 60 + 31, 15 * 60))
        .collect()
}

/// Generates `days` weekday sessions of 1-minute bars starting 2024-01-02.
///
/// Prices follow a deterministic pseudo-random walk so runs are repeatable.
pub fn synthetic_series(days: usize) -> Vec<IntradayBar> {
    let times = session_times();
    let mut bars = Vec::with_capacity(days * times.len());
    let mut date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap_or_default();
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut price = 3_800.0_f64;

    let mut produced = 0;
    while produced < days {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let stamp = date.year() as u32 * 10_000 + date.month() * 100 + date.day();
            for &time in &times {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                let step = ((state >> 33) % 9) as f64 - 4.0;
                let open = price;
                let close = open + step;
                let high = open.max(close) + ((state >> 20) % 3) as f64;
                let low = open.min(close) - ((state >> 24) % 3) as f64;
                let volume = ((state >> 40) % 500) as f64;
                bars.push(IntradayBar::new(stamp, time, open, high, low, close, volume));
                price = close;
            }
            produced += 1;
        }
        date += Duration::days(1);
    }

    bars
}

/// Renders bars as CSV with a combined `time` stamp column.
pub fn to_csv(bars: &[IntradayBar]) -> String {
    let mut csv = String::from("time,open,high,low,close,volume\n");
    for bar in bars {
        csv.push_str(&format!(
            "{}{:04},{},{},{},{},{}\n",
            bar.date, bar.time, bar.open, bar.high, bar.low, bar.close, bar.volume
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use kline_lib::aggregate_daily;

    #[test]
    fn test_session_times() {
        let times = session_times();
        assert_eq!(times.len(), 240);
        assert_eq!(times[0], 901);
        assert_eq!(times[149], 1130);
        assert_eq!(times[150], 1331);
        assert_eq!(*times.last().unwrap(), 1500);
    }

    #[test]
    fn test_synthetic_series_skips_weekends() {
        // 2024-01-05 is a Friday
        let bars = synthetic_series(4);
        let days = aggregate_daily(&bars);
        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![20240102, 20240103, 20240104, 20240105]);
        assert!(days.iter().all(|d| d.bar_count == 240));
    }

    #[test]
    fn test_to_csv_pads_time() {
        let bars = [IntradayBar::new(20240102, 901, 10.0, 12.0, 9.0, 11.5, 100.0)];
        assert_eq!(
            to_csv(&bars),
            "time,open,high,low,close,volume\n202401020901,10,12,9,11.5,100\n"
        );
    }
}
