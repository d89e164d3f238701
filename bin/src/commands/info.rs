//! Info command implementation.
//!
//! This module summarizes an intraday bar file: its span, session-close
//! markers and the trading days they produce.

use crate::display::{delimiter_byte, format_stamp};
use anyhow::{Context, Result};
use kline_lib::prelude::*;
use kline_lib::check_order;
use std::path::Path;

/// Show a summary of an intraday bar file.
pub(crate) async fn show_info(input: &Path, delimiter: char) -> Result<()> {
    let config = IngestConfig::default().with_delimiter(delimiter_byte(delimiter)?);
    let bars = read_bars_from_path(input, config)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    println!("File:        {}", input.display());
    println!("Bars:        {}", bars.len());

    let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
        return Ok(());
    };

    println!("First bar:   {}", format_stamp(first.date, first.time));
    println!("Last bar:    {}", format_stamp(last.date, last.time));

    let markers = bars.iter().filter(|bar| bar.is_session_close()).count();
    let mut dates: Vec<u32> = bars.iter().map(|bar| bar.date).collect();
    dates.dedup();
    let days = aggregate_daily(&bars);

    println!("Dates:       {}", dates.len());
    println!("Closes:      {markers} (at {SESSION_CLOSE})");
    println!("Daily bars:  {}", days.len());
    if !last.is_session_close() {
        println!("             last run closed by end of input");
    }

    match check_order(&bars) {
        Ok(()) => println!("Order:       strictly increasing"),
        Err(e) => println!("Order:       {e}"),
    }

    Ok(())
}
