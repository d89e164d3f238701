//! Async delimited-file reading.

use csv_async::{AsyncReaderBuilder, Trim};
use futures::stream::{Stream, StreamExt, TryStreamExt};
use kline_types::IntradayBar;
use std::path::Path;
use tokio::io::AsyncRead;
use tracing::{debug, info};

use crate::{ColumnMap, IngestError, parse_record};

/// Configuration for reading intraday files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestConfig {
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl IngestConfig {
    /// Creates a tab-separated configuration.
    #[must_use]
    pub const fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Creates an async stream of bars from a delimited reader.
///
/// The header row is read and resolved before the stream is returned, so a
/// missing column fails here rather than on the first row.
///
/// # Errors
///
/// Returns an error if the header cannot be read or lacks a required column.
pub async fn bar_stream<'r, R>(
    reader: R,
    config: IngestConfig,
) -> Result<impl Stream<Item = Result<IntradayBar, IngestError>> + 'r, IngestError>
where
    R: AsyncRead + Unpin + Send + 'r,
{
    let mut csv = AsyncReaderBuilder::new()
        .delimiter(config.delimiter)
        .trim(Trim::All)
        .flexible(true)
        .create_reader(reader);

    let columns = ColumnMap::from_headers(csv.headers().await?.iter())?;
    debug!(?columns, "resolved bar columns");

    Ok(csv.into_records().enumerate().map(move |(index, record)| {
        let record = record?;
        // Header is line 1
        let line = record
            .position()
            .map_or(index as u64 + 2, |position| position.line());
        parse_record(&record, &columns, line)
    }))
}

/// Reads every bar from a delimited reader.
///
/// # Errors
///
/// Returns the first header, row, or I/O error encountered.
pub async fn read_bars<R>(reader: R, config: IngestConfig) -> Result<Vec<IntradayBar>, IngestError>
where
    R: AsyncRead + Unpin + Send,
{
    bar_stream(reader, config).await?.try_collect().await
}

/// Reads every bar from a delimited file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub async fn read_bars_from_path(
    path: impl AsRef<Path>,
    config: IngestConfig,
) -> Result<Vec<IntradayBar>, IngestError> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path).await?;
    let bars = read_bars(file, config).await?;

    info!(path = %path.display(), bars = bars.len(), "read intraday bars");
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kline_types::Field;
    use std::io::Write;

    const SAMPLE: &str = "\
time,open,high,low,close,volume,open_interest
20240102093100,10,12,9,11,100,5
20240102150000,11,13,10,12,200,6
20240103093100,12,14,11.5,13.5,70.5,7
";

    #[tokio::test]
    async fn test_read_bars() {
        let bars = read_bars(SAMPLE.as_bytes(), IngestConfig::default())
            .await
            .unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0], IntradayBar::new(20240102, 931, 10.0, 12.0, 9.0, 11.0, 100.0));
        assert!(bars[1].is_session_close());
        assert_eq!(bars[2].volume, 70.5);
    }

    #[tokio::test]
    async fn test_stream_reports_line() {
        let input = "\
time,open,high,low,close,volume
202401020931,10,12,9,11,100
202401021500,oops,13,10,12,200
";
        let results: Vec<_> = bar_stream(input.as_bytes(), IngestConfig::default())
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(IngestError::InvalidNumber { line: 3, field: Field::Open, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_column_fails_early() {
        let input = "time,open,high,low,close\n202401020931,10,12,9,11\n";
        let result = bar_stream(input.as_bytes(), IngestConfig::default()).await;
        assert!(matches!(result, Err(IngestError::MissingColumn(Field::Volume))));
    }

    #[tokio::test]
    async fn test_empty_body() {
        let input = "time,open,high,low,close,volume\n";
        let bars = read_bars(input.as_bytes(), IngestConfig::default())
            .await
            .unwrap();
        assert!(bars.is_empty());
    }

    #[tokio::test]
    async fn test_read_from_path_tsv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Time\tOpen\tHigh\tLow\tClose\tVolume\n202401020931\t10\t12\t9\t11\t100\n"
        )
        .unwrap();

        let bars = read_bars_from_path(file.path(), IngestConfig::tsv())
            .await
            .unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].time, 931);
    }
}
