//! CSV output format.

use kline_types::{DailyBar, IntradayBar};
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_intraday<W: Write + Send>(
        &self,
        bars: &[IntradayBar],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "date{d}time{d}open{d}high{d}low{d}close{d}volume")?;
        }

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{:04}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.date, bar.time, bar.open, bar.high, bar.low, bar.close, bar.volume
            )?;
        }

        Ok(())
    }

    fn write_daily<W: Write + Send>(
        &self,
        bars: &[DailyBar],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "date{d}open{d}high{d}low{d}close{d}volume{d}bar_count")?;
        }

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume, bar.bar_count
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn create_test_day() -> DailyBar {
        DailyBar::new(20240102, 10.0, 13.0, 9.0, 12.5, 300.0, 2)
    }

    #[test]
    fn test_csv_daily() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_daily(&[create_test_day()], &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(
            result,
            "date,open,high,low,close,volume,bar_count\n20240102,10,13,9,12.5,300,2\n"
        );
    }

    #[test]
    fn test_csv_intraday_pads_time() {
        let formatter = CsvFormatter::new().with_header(false);
        let bars = [IntradayBar::new(20240102, 931, 10.0, 12.0, 9.0, 11.0, 100.0)];
        let mut output = Cursor::new(Vec::new());

        formatter.write_intraday(&bars, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert_eq!(result, "20240102,0931,10,12,9,11,100\n");
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let mut output = Cursor::new(Vec::new());

        formatter.write_daily(&[create_test_day()], &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("date\topen\thigh"));
    }
}
