//! Header resolution and row conversion.

use csv_async::StringRecord;
use kline_types::{Field, IntradayBar, Stamp};

use crate::IngestError;

/// Column positions of the bar fields within a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    date: Option<usize>,
    time: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl ColumnMap {
    /// Resolves bar columns from header names.
    ///
    /// Names are matched case-insensitively; unknown columns are ignored and
    /// the first occurrence of a repeated name wins.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing.
    pub fn from_headers<'a>(
        headers: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, IngestError> {
        let mut slots: [Option<usize>; 7] = [None; 7];
        for (index, name) in headers.into_iter().enumerate() {
            if let Ok(field) = name.parse::<Field>() {
                let slot = &mut slots[slot_of(field)];
                if slot.is_none() {
                    *slot = Some(index);
                }
            }
        }

        let require = |field: Field| slots[slot_of(field)].ok_or(IngestError::MissingColumn(field));

        Ok(Self {
            date: slots[slot_of(Field::Date)],
            time: require(Field::Time)?,
            open: require(Field::Open)?,
            high: require(Field::High)?,
            low: require(Field::Low)?,
            close: require(Field::Close)?,
            volume: require(Field::Volume)?,
        })
    }

    /// Returns true if dates come from a separate `date` column.
    #[must_use]
    pub const fn has_date_column(&self) -> bool {
        self.date.is_some()
    }
}

const fn slot_of(field: Field) -> usize {
    match field {
        Field::Date => 0,
        Field::Time => 1,
        Field::Open => 2,
        Field::High => 3,
        Field::Low => 4,
        Field::Close => 5,
        Field::Volume => 6,
    }
}

/// Reads a time-of-day cell as `HHMM`.
///
/// The width of the cell decides its layout: up to four digits is `HHMM`,
/// five or six digits is `HHMMSS` and is truncated to minutes.
fn clock_time(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = raw.parse::<u32>().ok()?;
    match raw.len() {
        1..=4 => Some(value),
        5 | 6 => Some(value / 100),
        _ => None,
    }
}

/// Converts one data row into an intraday bar.
///
/// `line` is the 1-based line number used in error messages.
///
/// # Errors
///
/// Returns an error if a cell is missing or malformed, or volume is negative.
pub fn parse_record(
    record: &StringRecord,
    columns: &ColumnMap,
    line: u64,
) -> Result<IntradayBar, IngestError> {
    let cell = |index: usize, field: Field| {
        record
            .get(index)
            .map(str::trim)
            .ok_or(IngestError::MissingValue { line, field })
    };
    let invalid = |field: Field, raw: &str| IngestError::InvalidNumber {
        line,
        field,
        value: raw.to_string(),
    };
    let number = |index: usize, field: Field| {
        let raw = cell(index, field)?;
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| invalid(field, raw))
    };

    let (date, time) = match columns.date {
        Some(date_index) => {
            let raw = cell(date_index, Field::Date)?;
            let date = raw.parse::<u32>().map_err(|_| invalid(Field::Date, raw))?;
            let raw = cell(columns.time, Field::Time)?;
            let time = clock_time(raw).ok_or_else(|| invalid(Field::Time, raw))?;
            (date, time)
        }
        None => {
            let stamp = Stamp::parse(cell(columns.time, Field::Time)?)
                .map_err(|source| IngestError::Stamp { line, source })?;
            (stamp.date(), stamp.minute_time())
        }
    };

    let volume = number(columns.volume, Field::Volume)?;
    if volume < 0.0 {
        return Err(IngestError::NegativeVolume { line, volume });
    }

    Ok(IntradayBar::new(
        date,
        time,
        number(columns.open, Field::Open)?,
        number(columns.high, Field::High)?,
        number(columns.low, Field::Low)?,
        number(columns.close, Field::Close)?,
        volume,
    ))
}
