//! Pipeline stages from the data folder to the written report.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::DataFrame;
use rotation_core::{EngineInput, EngineOutput, available_weeks, banner_sales, run_engine};
use rotation_ingest::{SheetSelector, SourceFiles, load_table, select_sources};
use rotation_model::SourceKind;
use rotation_report::{ReportPayload, write_report};
use tracing::{info, info_span, warn};

use crate::config::RunConfig;

/// Header rows tried, in order, on the recap sheet.
pub const RECAP_HEADER_ROWS: [usize; 5] = [0, 1, 2, 3, 4];

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub config: RunConfig,
    /// Week asked for on the command line; skips the prompt.
    pub requested_week: Option<NaiveDate>,
    pub dry_run: bool,
    /// Run timestamp: the fallback week and the report file name.
    pub now: NaiveDateTime,
}

/// Raw tables, empty when a source is absent or unreadable.
#[derive(Debug, Clone)]
pub struct LoadedSources {
    pub stock: DataFrame,
    pub sales: DataFrame,
    pub recap: DataFrame,
    pub depot: DataFrame,
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub sources: SourceFiles,
    pub output: EngineOutput,
    /// `None` on a dry run.
    pub report: Option<PathBuf>,
}

/// Selects the input files and checks the mandatory ones are present.
///
/// Weekly sales are required. Of stock and recap at least one is required,
/// the other being the fallback of the first.
pub fn discover(config: &RunConfig) -> Result<SourceFiles> {
    let span = info_span!("discover", dir = %config.data_dir.display());
    let _guard = span.enter();
    let patterns = config.patterns.resolved();
    let files = select_sources(&config.data_dir, &patterns)
        .with_context(|| format!("scan data folder {}", config.data_dir.display()))?;

    if files.get(SourceKind::WeeklySales).is_none() {
        bail!(
            "missing mandatory source: no weekly sales file matches '{}' in {}",
            patterns[&SourceKind::WeeklySales],
            config.data_dir.display()
        );
    }
    if files.get(SourceKind::Stock).is_none() && files.get(SourceKind::Recap).is_none() {
        bail!(
            "missing mandatory sources: neither stock ('{}') nor recap ('{}') found in {}",
            patterns[&SourceKind::Stock],
            patterns[&SourceKind::Recap],
            config.data_dir.display()
        );
    }
    for kind in files.missing() {
        let pattern = &patterns[&kind];
        warn!(source = %kind, pattern = %pattern, "optional source not found");
    }
    Ok(files)
}

fn sheet_for(kind: SourceKind) -> SheetSelector {
    match (kind, kind.preferred_sheet()) {
        (SourceKind::Stock, Some(name)) => SheetSelector::Name(name.to_string()),
        (_, Some(name)) => SheetSelector::NameOrFirst(name.to_string()),
        (_, None) => SheetSelector::first(),
    }
}

fn load_source(files: &SourceFiles, kind: SourceKind) -> DataFrame {
    let Some(path) = files.get(kind) else {
        return DataFrame::empty();
    };
    let header_rows = (kind == SourceKind::Recap).then_some(&RECAP_HEADER_ROWS[..]);
    let df = load_table(path, &sheet_for(kind), header_rows);
    info!(source = %kind, rows = df.height(), columns = df.width(), "source loaded");
    df
}

/// Reads every selected file. Never fails: unreadable sources are empty.
pub fn load_sources(files: &SourceFiles) -> LoadedSources {
    let span = info_span!("load");
    let _guard = span.enter();
    let start = Instant::now();
    let sources = LoadedSources {
        stock: load_source(files, SourceKind::Stock),
        sales: load_source(files, SourceKind::WeeklySales),
        recap: load_source(files, SourceKind::Recap),
        depot: load_source(files, SourceKind::SecondaryDepot),
    };
    info!(duration_ms = start.elapsed().as_millis(), "sources loaded");
    sources
}

/// Runs discovery, loading, reconciliation and report writing.
///
/// `choose_week` is asked for a week, given the weeks present in the
/// banner's sales, only when no week was requested up front.
pub fn run_pipeline<F>(options: &PipelineOptions, choose_week: F) -> Result<PipelineResult>
where
    F: FnOnce(&[NaiveDate]) -> Option<NaiveDate>,
{
    let config = &options.config;
    let files = discover(config)?;
    let sources = load_sources(&files);

    let requested_week = match options.requested_week {
        Some(week) => Some(week),
        None => {
            let sales = banner_sales(&sources.sales, &config.banner)
                .context("filter sales by banner")?;
            choose_week(&available_weeks(&sales))
        }
    };

    let input = EngineInput {
        stock: sources.stock,
        sales: sources.sales,
        recap: sources.recap,
        depot: sources.depot,
        banner: config.banner.clone(),
        requested_week,
        today: options.now.date(),
        top_n: config.top_n,
        currency: config.currency.clone(),
    };
    let output = run_engine(&input).context("reconcile extracts")?;

    let report = if options.dry_run {
        info!("dry run; report not written");
        None
    } else {
        let payload = ReportPayload::from_output(
            &output,
            config.report_prefix.clone(),
            config.currency.clone(),
            options.now,
        );
        let path = write_report(&payload, &config.output_dir)
            .with_context(|| format!("write report to {}", config.output_dir.display()))?;
        Some(path)
    };

    Ok(PipelineResult {
        sources: files,
        output,
        report,
    })
}
