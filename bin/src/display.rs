//! Display utilities and output writing for the kline CLI.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use kline_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format for daily bars.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Converts a delimiter flag into the byte the reader expects.
pub(crate) fn delimiter_byte(delimiter: char) -> Result<u8> {
    match u8::try_from(delimiter) {
        Ok(byte) if byte.is_ascii() => Ok(byte),
        _ => bail!("Delimiter must be a single ASCII character, got {delimiter:?}"),
    }
}

/// Opens a buffered writer on `output`, or stdout when absent.
pub(crate) fn open_output(output: Option<&Path>) -> Result<BufWriter<Box<dyn Write + Send>>> {
    let sink: Box<dyn Write + Send> = match output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    Ok(BufWriter::new(sink))
}

/// Write daily bars in the specified format.
pub(crate) fn write_daily<W: Write + Send>(
    days: &[DailyBar],
    writer: W,
    format: Format,
) -> Result<()> {
    match format {
        Format::Csv => {
            let formatter = CsvFormatter::new();
            formatter.write_daily(days, writer)?;
        }
        Format::Json => {
            let formatter = JsonFormatter::new();
            formatter.write_daily(days, writer)?;
        }
        Format::Ndjson => {
            let formatter = JsonFormatter::ndjson();
            formatter.write_daily(days, writer)?;
        }
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                let formatter = ParquetFormatter::new();
                formatter.write_daily(days, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                let _ = writer;
                bail!("Parquet support not compiled in");
            }
        }
    }

    Ok(())
}

/// Formats a `YYYYMMDD` date and `HHMM` time for humans.
pub(crate) fn format_stamp(date: u32, time: u32) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}",
        date / 10_000,
        date / 100 % 100,
        date % 100,
        time / 100,
        time % 100
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_byte() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(delimiter_byte('é').is_err());
    }

    #[test]
    fn test_write_daily_csv() {
        let days = [DailyBar::new(20240102, 10.0, 13.0, 9.0, 12.0, 300.0, 2)];
        let mut out = Vec::new();
        write_daily(&days, &mut out, Format::Csv).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("20240102,10,13,9,12,300,2\n"));
    }

    #[test]
    fn test_format_stamp() {
        assert_eq!(format_stamp(20240102, 931), "2024-01-02 09:31");
    }
}
