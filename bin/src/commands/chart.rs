//! Chart command implementation.
//!
//! This module selects a date window from an intraday bar file, optionally
//! rolls it up to daily bars, and writes the chart record and chart page.

use crate::display::delimiter_byte;
use anyhow::{Context, Result};
use kline_lib::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output options for a chart.
#[derive(Debug)]
pub(crate) struct ChartOptions {
    pub(crate) template: Option<PathBuf>,
    pub(crate) out_dir: PathBuf,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) series: bool,
    pub(crate) quiet: bool,
}

/// Load a chart request from a JSON file.
pub(crate) fn load_request(path: &Path) -> Result<ChartRequest> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read chart config {}", path.display()))?;
    ChartRequest::from_json(&json)
        .with_context(|| format!("Invalid chart config {}", path.display()))
}

/// Build a chart request from command-line flags.
pub(crate) fn build_request(
    timeframe: Timeframe,
    model: ChartModel,
    start_date: Option<u32>,
    end_date: Option<u32>,
    times: Option<(u32, u32)>,
    symbol: Option<String>,
) -> Result<ChartRequest> {
    let start_date = start_date.context("--start-date is required")?;
    let end_date = end_date.context("--end-date is required")?;

    let mut request = ChartRequest::new(timeframe, model, start_date, end_date)?;
    if let Some((start_time, end_time)) = times {
        request = request.with_times(start_time, end_time)?;
    }
    if let Some(symbol) = symbol {
        request = request.with_symbol(symbol);
    }
    Ok(request)
}

/// Render the chart described by `request` from an intraday file.
pub(crate) async fn chart(
    input: &Path,
    delimiter: char,
    request: &ChartRequest,
    options: &ChartOptions,
) -> Result<()> {
    debug!(?request, "chart request");

    let config = IngestConfig::default().with_delimiter(delimiter_byte(delimiter)?);
    let bars = read_bars_from_path(input, config)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    if request.timeframe.is_daily() {
        let days = aggregate_daily(&bars);
        emit(&days, request, options)
    } else {
        emit(&bars, request, options)
    }
}

fn emit<B: Bar>(bars: &[B], request: &ChartRequest, options: &ChartOptions) -> Result<()> {
    let window = select_window(bars, request).context("Failed to select chart window")?;
    info!(bars = window.len(), name = %request.save_name(), "selected chart window");

    std::fs::create_dir_all(&options.out_dir)
        .with_context(|| format!("Failed to create {}", options.out_dir.display()))?;

    let writer = ChartWriter::new(request.model);

    let data_path = options.out_dir.join(request.data_file_name());
    write_file(&data_path, |w| Ok(writer.write(window, w)?))?;

    let template = match &options.template {
        Some(path) => ChartTemplate::from_path(path)?,
        None => ChartTemplate::candlestick()?,
    };
    let page = ChartPage::new(request.title(), writer.render(window))
        .with_size(options.width, options.height);
    let html = page.render(&template).context("Failed to render chart page")?;

    let page_path = options.out_dir.join(request.page_file_name());
    write_file(&page_path, |w| Ok(w.write_all(html.as_bytes())?))?;

    if options.series {
        let series_path = data_path.with_extension("json");
        write_file(&series_path, |w| Ok(writer.write_series(window, w)?))?;
    }

    if !options.quiet {
        eprintln!("Chart record written to: {}", data_path.display());
        eprintln!("Chart page written to:   {}", page_path.display());
    }

    Ok(())
}

fn write_file(path: &Path, write: impl FnOnce(&mut BufWriter<File>) -> Result<()>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush()?;
    Ok(())
}
