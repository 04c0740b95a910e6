//! CLI argument definitions for the airport statistics tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "aero-stats",
    version,
    about = "Airport statistics - combine yearly flight reports and explore them",
    long_about = "Load the yearly flight reports and the airport reference file,\n\
                  reconcile their column names and dates, and print views over\n\
                  the combined flight table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the dataset files [default: dataset].
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// JSON file overriding the catalog and reader options.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Row and column counts of the combined table and of every source.
    Summary,

    /// Passengers over time, optionally restricted to a date range.
    Daily(DailyArgs),

    /// Flight counts per airport.
    Airports,

    /// Aircraft type distribution.
    Aircraft,

    /// Passengers per year.
    Yearly,

    /// Reference details of one airport (lists airport names when omitted).
    Airport(AirportArgs),

    /// Which catalog files are present in the data directory.
    Sources,
}

#[derive(Parser)]
pub struct DailyArgs {
    /// First day to include (YYYY-MM-DD, default: earliest date).
    #[arg(long = "from", value_name = "DATE", value_parser = parse_day)]
    pub from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD, default: latest date).
    #[arg(long = "to", value_name = "DATE", value_parser = parse_day)]
    pub to: Option<NaiveDate>,

    /// Sum passengers per calendar month instead of per day.
    #[arg(long = "by-month", conflicts_with = "histogram")]
    pub by_month: bool,

    /// Sum passengers into N equal-width date buckets.
    #[arg(long = "histogram", value_name = "N", num_args = 0..=1, default_missing_value = "30")]
    pub histogram: Option<usize>,

    /// Print every (date, passengers) point instead of daily totals.
    #[arg(long = "points", conflicts_with_all = ["by_month", "histogram"])]
    pub points: bool,
}

#[derive(Parser)]
pub struct AirportArgs {
    /// Exact airport name as written in the reference file.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|error| format!("expected YYYY-MM-DD: {error}"))
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
