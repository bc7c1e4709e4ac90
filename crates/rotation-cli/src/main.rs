//! Weekly rotation dashboard CLI.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{ColorChoice, Parser};
use rotation_cli::config::{ConfigOverrides, load_config};
use rotation_cli::logging::{LogConfig, LogFormat, init_logging};
use rotation_cli::pipeline::{PipelineOptions, run_pipeline};
use rotation_cli::prompt::{is_interactive, prompt_week, wait_for_ack};
use rotation_cli::summary::{print_json, print_summary};
use tracing::{error, warn};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, LogFormatArg, LogLevelArg, SummaryFormatArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let interactive = is_interactive();
    let exit_code = match run(&cli, interactive) {
        Ok(()) => 0,
        Err(err) => {
            error!("run failed: {err:#}");
            eprintln!("error: {err:#}");
            1
        }
    };
    if interactive && !cli.no_pause {
        wait_for_ack();
    }
    std::process::exit(exit_code);
}

fn run(cli: &Cli, interactive: bool) -> Result<()> {
    let overrides = ConfigOverrides {
        data_dir: cli.data_dir.clone(),
        output_dir: cli.output_dir.clone(),
        banner: cli.banner.clone(),
    };
    let config = load_config(cli.config.as_deref())?.with_overrides(&overrides);
    config.validate()?;
    let currency = config.currency.clone();
    let options = PipelineOptions {
        config,
        requested_week: cli.week,
        dry_run: cli.dry_run,
        now: Local::now().naive_local(),
    };

    let ask = interactive && !cli.no_prompt;
    let result = run_pipeline(&options, |weeks| {
        if !ask {
            return None;
        }
        prompt_week(weeks, io::stdin().lock(), io::stderr()).unwrap_or_else(|err| {
            warn!(error = %err, "week prompt failed; using the latest week");
            None
        })
    })?;

    match cli.summary_format {
        SummaryFormatArg::Table => print_summary(&result, &currency),
        SummaryFormatArg::Json => print_json(&result).context("serialize summary")?,
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
