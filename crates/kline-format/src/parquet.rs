//! Apache Parquet output format.

use arrow::array::{Float64Array, TimestampMicrosecondArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use kline_types::{DailyBar, IntradayBar};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for intraday bars.
    ///
    /// `timestamp` is exchange-local and null when date or time is not a
    /// valid calendar value.
    fn intraday_schema() -> Schema {
        Schema::new(vec![
            Field::new(
                "timestamp",
                DataType::Timestamp(TimeUnit::Microsecond, None),
                true,
            ),
            Field::new("date", DataType::UInt32, false),
            Field::new("time", DataType::UInt32, false),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("volume", DataType::Float64, false),
        ])
    }

    /// Creates the Arrow schema for daily bars.
    fn daily_schema() -> Schema {
        Schema::new(vec![
            Field::new("date", DataType::UInt32, false),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new("volume", DataType::Float64, false),
            Field::new("bar_count", DataType::UInt32, false),
        ])
    }

    /// Converts intraday bars to an Arrow `RecordBatch`.
    fn intraday_to_batch(
        schema: SchemaRef,
        bars: &[IntradayBar],
    ) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = bars
            .iter()
            .map(|b| b.naive_datetime().map(|dt| dt.and_utc().timestamp_micros()))
            .collect();
        let dates: Vec<_> = bars.iter().map(|b| b.date).collect();
        let times: Vec<_> = bars.iter().map(|b| b.time).collect();
        let opens: Vec<_> = bars.iter().map(|b| b.open).collect();
        let highs: Vec<_> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<_> = bars.iter().map(|b| b.low).collect();
        let closes: Vec<_> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<_> = bars.iter().map(|b| b.volume).collect();

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(TimestampMicrosecondArray::from(timestamps)),
                Arc::new(UInt32Array::from(dates)),
                Arc::new(UInt32Array::from(times)),
                Arc::new(Float64Array::from(opens)),
                Arc::new(Float64Array::from(highs)),
                Arc::new(Float64Array::from(lows)),
                Arc::new(Float64Array::from(closes)),
                Arc::new(Float64Array::from(volumes)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    /// Converts daily bars to an Arrow `RecordBatch`.
    fn daily_to_batch(schema: SchemaRef, bars: &[DailyBar]) -> Result<RecordBatch, FormatError> {
        let dates: Vec<_> = bars.iter().map(|b| b.date).collect();
        let opens: Vec<_> = bars.iter().map(|b| b.open).collect();
        let highs: Vec<_> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<_> = bars.iter().map(|b| b.low).collect();
        let closes: Vec<_> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<_> = bars.iter().map(|b| b.volume).collect();
        let counts: Vec<_> = bars.iter().map(|b| b.bar_count).collect();

        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(UInt32Array::from(dates)),
                Arc::new(Float64Array::from(opens)),
                Arc::new(Float64Array::from(highs)),
                Arc::new(Float64Array::from(lows)),
                Arc::new(Float64Array::from(closes)),
                Arc::new(Float64Array::from(volumes)),
                Arc::new(UInt32Array::from(counts)),
            ],
        )
        .map_err(|e| FormatError::Parquet(e.to_string()))
    }

    fn write_chunked<T, W>(
        &self,
        schema: Schema,
        rows: &[T],
        to_batch: fn(SchemaRef, &[T]) -> Result<RecordBatch, FormatError>,
        writer: W,
    ) -> Result<(), FormatError>
    where
        W: Write + Send,
    {
        let schema = Arc::new(schema);
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, Arc::clone(&schema), Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        for chunk in rows.chunks(self.row_group_size.max(1)) {
            let batch = to_batch(Arc::clone(&schema), chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }
}

impl Formatter for ParquetFormatter {
    fn write_intraday<W: Write + Send>(
        &self,
        bars: &[IntradayBar],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_chunked(Self::intraday_schema(), bars, Self::intraday_to_batch, writer)
    }

    fn write_daily<W: Write + Send>(
        &self,
        bars: &[DailyBar],
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_chunked(Self::daily_schema(), bars, Self::daily_to_batch, writer)
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}
