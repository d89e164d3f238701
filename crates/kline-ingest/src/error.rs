//! Ingestion errors.

use kline_types::{Field, KlineError, StampError};
use thiserror::Error;

/// Errors that can occur while reading intraday bars.
#[derive(Error, Debug)]
pub enum IngestError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    /// The header lacks a required column.
    #[error("Missing required column: {0}")]
    MissingColumn(Field),

    /// A row is shorter than the header.
    #[error("Line {line}: missing value for {field}")]
    MissingValue {
        /// 1-based line number.
        line: u64,
        /// The absent field.
        field: Field,
    },

    /// A cell could not be parsed as a number.
    #[error("Line {line}: invalid {field} value '{value}'")]
    InvalidNumber {
        /// 1-based line number.
        line: u64,
        /// The field being parsed.
        field: Field,
        /// The raw cell.
        value: String,
    },

    /// The combined timestamp could not be split.
    #[error("Line {line}: {source}")]
    Stamp {
        /// 1-based line number.
        line: u64,
        /// The underlying split error.
        #[source]
        source: StampError,
    },

    /// Volume is negative.
    #[error("Line {line}: negative volume {volume}")]
    NegativeVolume {
        /// 1-based line number.
        line: u64,
        /// The offending volume.
        volume: f64,
    },
}

impl From<IngestError> for KlineError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Io(e) => Self::Io(e),
            other => Self::Parse(other.to_string()),
        }
    }
}
