//! Daily command implementation.
//!
//! Reads an intraday bar file, rolls it into daily bars at each session close
//! and writes the result.

use crate::display::{Format, delimiter_byte, open_output, write_daily};
use anyhow::{Context, Result};
use kline_lib::prelude::*;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Aggregate an intraday file into daily bars.
pub(crate) async fn daily(
    input: &Path,
    delimiter: char,
    output: Option<&Path>,
    format: Format,
    strict: bool,
    quiet: bool,
) -> Result<()> {
    let config = IngestConfig::default().with_delimiter(delimiter_byte(delimiter)?);
    let bars = read_bars_from_path(input, config)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let days = if strict {
        try_aggregate_daily(&bars).context("Input is not in strictly increasing stamp order")?
    } else {
        aggregate_daily(&bars)
    };
    info!(bars = bars.len(), days = days.len(), %format, "aggregated daily bars");

    let mut writer = open_output(output)?;
    write_daily(&days, &mut writer, format)?;
    writer.flush()?;

    if let Some(path) = output
        && !quiet
    {
        eprintln!("Wrote {} daily bars to: {}", days.len(), path.display());
    }

    Ok(())
}
