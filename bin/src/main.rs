//! kline CLI - intraday-to-daily candlestick aggregation and charting.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use kline_lib::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "kline")]
#[command(about = "Intraday-to-daily candlestick aggregation and charting", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress logs and status output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Intraday input file options.
#[derive(Args)]
struct InputArgs {
    /// Intraday bar file with time, open, high, low, close and volume columns
    input: PathBuf,

    /// Field delimiter of the input file
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate intraday bars into daily bars
    Daily {
        #[command(flatten)]
        input: InputArgs,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Reject input whose stamps are not strictly increasing
        #[arg(long)]
        strict: bool,
    },

    /// Render a candlestick chart record and page for a date window
    Chart {
        #[command(flatten)]
        input: InputArgs,

        /// Chart request as JSON (replaces the window and style flags)
        #[arg(
            long,
            conflicts_with_all = [
                "start_date",
                "end_date",
                "start_time",
                "end_time",
                "timeframe",
                "model",
                "symbol",
            ]
        )]
        config: Option<PathBuf>,

        /// First date of the window (YYYYMMDD)
        #[arg(long, required_unless_present = "config")]
        start_date: Option<u32>,

        /// Last date of the window (YYYYMMDD)
        #[arg(long, required_unless_present = "config")]
        end_date: Option<u32>,

        /// Time of the first bar (HHMM); requires --end-time
        #[arg(long, requires = "end_time")]
        start_time: Option<u32>,

        /// Time of the last bar (HHMM); requires --start-time
        #[arg(long, requires = "start_time")]
        end_time: Option<u32>,

        /// Chart timeframe (1m, 5m, d)
        #[arg(short, long, default_value = "1m")]
        timeframe: Timeframe,

        /// Chart model (candle, candle-volume)
        #[arg(short, long, default_value = "candle")]
        model: ChartModel,

        /// Symbol shown in the chart title
        #[arg(short, long)]
        symbol: Option<String>,

        /// Page template with {{title}}, {{width}}, {{height}} and {{data}} placeholders
        #[arg(long)]
        template: Option<PathBuf>,

        /// Directory for the chart record and page
        #[arg(long, default_value = "data_file")]
        out_dir: PathBuf,

        /// Chart width in pixels
        #[arg(long, default_value_t = ChartPage::DEFAULT_WIDTH)]
        width: u32,

        /// Chart height in pixels
        #[arg(long, default_value_t = ChartPage::DEFAULT_HEIGHT)]
        height: u32,

        /// Also write the window as a JSON series of [epoch_ms, values...] rows
        #[arg(long)]
        series: bool,
    },

    /// Summarize an intraday bar file
    Info {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides the level picked from the verbosity flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::OFF,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        // Disable colours on release builds
        .with_ansi(cfg!(debug_assertions))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Daily {
            input,
            output,
            format,
            strict,
        } => {
            commands::daily::daily(
                &input.input,
                input.delimiter,
                output.as_deref(),
                format,
                strict,
                cli.quiet,
            )
            .await
        }
        Commands::Chart {
            input,
            config,
            start_date,
            end_date,
            start_time,
            end_time,
            timeframe,
            model,
            symbol,
            template,
            out_dir,
            width,
            height,
            series,
        } => {
            let request = match config {
                Some(path) => commands::chart::load_request(&path)?,
                None => commands::chart::build_request(
                    timeframe,
                    model,
                    start_date,
                    end_date,
                    start_time.zip(end_time),
                    symbol,
                )?,
            };
            let options = commands::chart::ChartOptions {
                template,
                out_dir,
                width,
                height,
                series,
                quiet: cli.quiet,
            };
            commands::chart::chart(&input.input, input.delimiter, &request, &options).await
        }
        Commands::Info { input } => commands::info::show_info(&input.input, input.delimiter).await,
    }
}
