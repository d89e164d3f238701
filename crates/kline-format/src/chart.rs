//! Chart record output.
//!
//! A chart record is one line per bar:
//!
//! ```text
//! ['2024/01/02 9:31',10,11,9,12],
//! ['2024/01/02 15:00',11,12,10,13]
//! ```
//!
//! Values follow the chart model's field order. Daily bars omit the time
//! from the label. Every line but the last carries a trailing comma, so the
//! record can be spliced into a JavaScript array literal.

use kline_types::{Bar, ChartModel, naive_datetime};
use serde_json::Value;
use std::io::Write;
use tracing::debug;

use crate::FormatError;

/// Writes bars as chart records.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartWriter {
    model: ChartModel,
}

impl ChartWriter {
    /// Creates a writer for the given chart model.
    #[must_use]
    pub const fn new(model: ChartModel) -> Self {
        Self { model }
    }

    /// Returns the chart model.
    #[must_use]
    pub const fn model(&self) -> ChartModel {
        self.model
    }

    /// Returns the label of a bar: `YYYY/MM/DD`, followed by ` H:MM` when
    /// the bar has a time.
    #[must_use]
    pub fn label<B: Bar>(bar: &B) -> String {
        let date = bar.date();
        let label = format!("{:04}/{:02}/{:02}", date / 10_000, date / 100 % 100, date % 100);
        match bar.time() {
            Some(time) => format!("{label} {}:{:02}", time / 100, time % 100),
            None => label,
        }
    }

    /// Formats one bar as a chart line, without the separator.
    #[must_use]
    pub fn line<B: Bar>(&self, bar: &B) -> String {
        let mut line = format!("['{}'", Self::label(bar));
        for &field in self.model.fields() {
            match bar.value(field) {
                Some(value) => line.push_str(&format!(",{value}")),
                None => line.push_str(",null"),
            }
        }
        line.push(']');
        line
    }

    /// Writes the chart record for `bars`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write<B: Bar, W: Write>(&self, bars: &[B], mut writer: W) -> Result<(), FormatError> {
        let last = bars.len().saturating_sub(1);
        for (index, bar) in bars.iter().enumerate() {
            let separator = if index < last { "," } else { "" };
            writeln!(writer, "{}{separator}", self.line(bar))?;
        }
        debug!(lines = bars.len(), model = %self.model, "wrote chart record");
        Ok(())
    }

    /// Renders the chart record for `bars` into a string.
    #[must_use]
    pub fn render<B: Bar>(&self, bars: &[B]) -> String {
        bars.iter()
            .map(|bar| self.line(bar))
            .collect::<Vec<_>>()
            .join(",\n")
    }

    /// Writes `bars` as a JSON series of `[epoch_ms, values...]` rows.
    ///
    /// Timestamps treat the exchange-local time as UTC; daily bars sit at
    /// midnight.
    ///
    /// # Errors
    ///
    /// Returns an error if a bar's date or time is invalid, or writing fails.
    pub fn write_series<B: Bar, W: Write>(
        &self,
        bars: &[B],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let rows = bars
            .iter()
            .map(|bar| self.series_row(bar))
            .collect::<Result<Vec<_>, _>>()?;
        serde_json::to_writer(&mut writer, &rows)?;
        writeln!(writer)?;
        Ok(())
    }

    fn series_row<B: Bar>(&self, bar: &B) -> Result<Value, FormatError> {
        let (date, time) = (bar.date(), bar.time().unwrap_or(0));
        let timestamp = naive_datetime(date, time)
            .ok_or(FormatError::InvalidTimestamp { date, time })?
            .and_utc()
            .timestamp_millis();

        let mut row = Vec::with_capacity(self.model.fields().len() + 1);
        row.push(Value::from(timestamp));
        row.extend(
            self.model
                .fields()
                .iter()
                .map(|&field| bar.value(field).map_or(Value::Null, Value::from)),
        );
        Ok(Value::Array(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kline_types::{DailyBar, IntradayBar};

    fn bars() -> Vec<IntradayBar> {
        vec![
            IntradayBar::new(20240102, 931, 10.0, 12.0, 9.0, 11.0, 100.0),
            IntradayBar::new(20240102, 1500, 11.0, 13.0, 10.0, 12.5, 200.0),
        ]
    }

    #[test]
    fn test_label() {
        assert_eq!(ChartWriter::label(&bars()[0]), "2024/01/02 9:31");
        assert_eq!(ChartWriter::label(&bars()[1]), "2024/01/02 15:00");
        let early = IntradayBar::new(20240102, 5, 1.0, 1.0, 1.0, 1.0, 0.0);
        assert_eq!(ChartWriter::label(&early), "2024/01/02 0:05");
        let day = DailyBar::new(20240102, 10.0, 13.0, 9.0, 12.5, 300.0, 2);
        assert_eq!(ChartWriter::label(&day), "2024/01/02");
    }

    #[test]
    fn test_write_candle() {
        let mut output = Vec::new();
        ChartWriter::new(ChartModel::Candle)
            .write(&bars(), &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "['2024/01/02 9:31',10,11,9,12],\n['2024/01/02 15:00',11,12.5,10,13]\n"
        );
    }

    #[test]
    fn test_write_with_volume() {
        let days = [DailyBar::new(20240102, 10.0, 13.0, 9.0, 12.5, 300.0, 2)];
        let mut output = Vec::new();
        ChartWriter::new(ChartModel::CandleVolume)
            .write(&days, &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "['2024/01/02',10,12.5,9,13,300]\n"
        );
    }

    #[test]
    fn test_render_matches_write() {
        let writer = ChartWriter::default();
        let mut output = Vec::new();
        writer.write(&bars(), &mut output).unwrap();

        assert_eq!(
            writer.render(&bars()),
            String::from_utf8(output).unwrap().trim_end()
        );
        assert!(writer.render::<IntradayBar>(&[]).is_empty());
    }

    #[test]
    fn test_series() {
        let mut output = Vec::new();
        ChartWriter::new(ChartModel::Candle)
            .write_series(&bars()[..1], &mut output)
            .unwrap();

        let rows: Vec<Vec<f64>> = serde_json::from_slice(&output).unwrap();
        // 2024-01-02T09:31:00Z
        assert_eq!(rows[0][0], 1_704_187_860_000.0);
        assert_eq!(&rows[0][1..], &[10.0, 11.0, 9.0, 12.0]);
    }

    #[test]
    fn test_series_invalid_timestamp() {
        let bad = [IntradayBar::new(20241332, 931, 1.0, 1.0, 1.0, 1.0, 0.0)];
        let result = ChartWriter::default().write_series(&bad, Vec::new());
        assert!(matches!(
            result,
            Err(FormatError::InvalidTimestamp { date: 20241332, time: 931 })
        ));
    }
}
