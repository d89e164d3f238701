//! Combined `YYYYMMDDHHMM[SS]` timestamp splitting.

use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;

use crate::StampError;

/// Number of leading digits holding the `YYYYMMDD` date.
const DATE_DIGITS: usize = 8;

/// A combined timestamp split into its date and time parts.
///
/// The split is purely lexical: the leading eight digits are the date and the
/// remaining four (`HHMM`) or six (`HHMMSS`) digits are the time. No timezone
/// conversion or calendar validation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stamp {
    date: u32,
    time: u32,
    time_digits: u8,
}

impl Stamp {
    /// Splits a combined timestamp string.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the stamp contains non-digits or is not 12 or 14
    /// digits long.
    pub fn parse(stamp: &str) -> Result<Self, StampError> {
        let stamp = stamp.trim();
        if stamp.is_empty() || !stamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(StampError::NonDigit(stamp.to_string()));
        }

        let time_digits = match stamp.len() {
            12 => 4,
            14 => 6,
            len => {
                return Err(StampError::InvalidLength {
                    stamp: stamp.to_string(),
                    len,
                });
            }
        };

        let (date, time) = stamp.split_at(DATE_DIGITS);
        let digits = |s: &str| {
            s.parse::<u32>()
                .map_err(|_| StampError::NonDigit(stamp.to_string()))
        };

        Ok(Self {
            date: digits(date)?,
            time: digits(time)?,
            time_digits,
        })
    }

    /// Splits a combined timestamp given as an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the integer does not have 12 or 14 digits.
    pub fn from_int(stamp: u64) -> Result<Self, StampError> {
        Self::parse(&stamp.to_string())
    }

    /// Returns the `YYYYMMDD` date.
    #[must_use]
    pub const fn date(&self) -> u32 {
        self.date
    }

    /// Returns the time digits as written (`HHMM` or `HHMMSS`).
    #[must_use]
    pub const fn time(&self) -> u32 {
        self.time
    }

    /// Returns true if the stamp carried seconds.
    #[must_use]
    pub const fn has_seconds(&self) -> bool {
        self.time_digits == 6
    }

    /// Returns the time truncated to minute granularity (`HHMM`).
    #[must_use]
    pub const fn minute_time(&self) -> u32 {
        if self.has_seconds() {
            self.time / 100
        } else {
            self.time
        }
    }

    /// Recombines the parts into the original zero-padded stamp.
    #[must_use]
    pub fn combined(&self) -> String {
        format!(
            "{:0dw$}{:0tw$}",
            self.date,
            self.time,
            dw = DATE_DIGITS,
            tw = usize::from(self.time_digits)
        )
    }

    /// Interprets the stamp as a calendar date-time, if the digits form one.
    #[must_use]
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        let (hhmm, seconds) = if self.has_seconds() {
            (self.time / 100, self.time % 100)
        } else {
            (self.time, 0)
        };
        naive_date(self.date)?.and_hms_opt(hhmm / 100, hhmm % 100, seconds)
    }
}

impl FromStr for Stamp {
    type Err = StampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Stamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.combined())
    }
}

/// Interprets a `YYYYMMDD` integer as a calendar date.
#[must_use]
pub fn naive_date(date: u32) -> Option<NaiveDate> {
    let year = i32::try_from(date / 10_000).ok()?;
    NaiveDate::from_ymd_opt(year, (date / 100) % 100, date % 100)
}

/// Interprets a `YYYYMMDD` date and `HHMM` time as a calendar date-time.
#[must_use]
pub fn naive_datetime(date: u32, time: u32) -> Option<NaiveDateTime> {
    naive_date(date)?.and_hms_opt(time / 100, time % 100, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use proptest::prelude::*;

    #[test]
    fn test_split_minutes() {
        let stamp = Stamp::parse("202401020931").unwrap();
        assert_eq!(stamp.date(), 20240102);
        assert_eq!(stamp.time(), 931);
        assert_eq!(stamp.minute_time(), 931);
        assert!(!stamp.has_seconds());
    }

    #[test]
    fn test_split_seconds() {
        let stamp = Stamp::parse("20240102150000").unwrap();
        assert_eq!(stamp.date(), 20240102);
        assert_eq!(stamp.time(), 150000);
        assert_eq!(stamp.minute_time(), 1500);
        assert!(stamp.has_seconds());
    }

    #[test]
    fn test_from_int() {
        let stamp = Stamp::from_int(20240102093100).unwrap();
        assert_eq!(stamp.minute_time(), 931);
        assert_eq!(stamp.combined(), "20240102093100");
    }

    #[test]
    fn test_combined_keeps_leading_zeros() {
        let stamp: Stamp = "202401020005".parse().unwrap();
        assert_eq!(stamp.time(), 5);
        assert_eq!(stamp.to_string(), "202401020005");
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            Stamp::parse("2024010209"),
            Err(StampError::InvalidLength { len: 10, .. })
        ));
        assert!(matches!(
            Stamp::parse("2024-01-02 09:31"),
            Err(StampError::NonDigit(_))
        ));
        assert!(matches!(Stamp::parse(""), Err(StampError::NonDigit(_))));
    }

    #[test]
    fn test_to_naive_datetime() {
        let dt = Stamp::parse("20240102093145")
            .unwrap()
            .to_naive_datetime()
            .unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.day(), 2);
        assert_eq!(dt.hour(), 9);
        assert_eq!(dt.minute(), 31);
        assert_eq!(dt.second(), 45);

        // Lexically valid, calendar invalid
        assert!(Stamp::parse("202413020931").unwrap().to_naive_datetime().is_none());
    }

    #[test]
    fn test_naive_datetime() {
        let dt = naive_datetime(20240102, 1500).unwrap();
        assert_eq!(dt.hour(), 15);
        assert!(naive_datetime(20240102, 2460).is_none());
    }

    proptest! {
        #[test]
        fn split_then_recombine_is_identity(
            date in 10_000_101u32..99_991_231,
            hhmm in 0u32..10_000,
            ss in proptest::option::of(0u32..100),
        ) {
            let original = match ss {
                Some(ss) => format!("{date:08}{hhmm:04}{ss:02}"),
                None => format!("{date:08}{hhmm:04}"),
            };
            let stamp = Stamp::parse(&original).unwrap();
            prop_assert_eq!(stamp.date(), date);
            prop_assert_eq!(stamp.minute_time(), hhmm);
            prop_assert_eq!(stamp.combined(), original);
        }
    }
}
