//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use rotation_cli::prompt::parse_week_arg;

#[derive(Parser)]
#[command(
    name = "rotation",
    version,
    about = "Weekly stock rotation dashboard",
    long_about = "Reconcile the latest stock, weekly sales and recap extracts of a banner\n\
                  into a dashboard workbook: KPIs, top sellers, per-article status and\n\
                  restocking recommendations."
)]
pub struct Cli {
    /// TOML configuration file (default: rotation.toml when present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Folder holding the extracts.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Folder receiving the report.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Banner whose articles are reported.
    #[arg(long)]
    pub banner: Option<String>,

    /// Week start to report (dd/mm/yyyy); the latest week otherwise.
    #[arg(long, value_name = "DD/MM/YYYY", value_parser = parse_week_arg)]
    pub week: Option<NaiveDate>,

    /// Never ask for the week interactively.
    #[arg(long = "no-prompt")]
    pub no_prompt: bool,

    /// Exit without waiting for Enter.
    #[arg(long = "no-pause")]
    pub no_pause: bool,

    /// Compute and print the summary without writing the report.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Console summary format.
    #[arg(long = "summary-format", value_enum, default_value = "table")]
    pub summary_format: SummaryFormatArg,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormatArg {
    Table,
    Json,
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
