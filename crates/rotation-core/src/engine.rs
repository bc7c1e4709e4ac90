//! The reconciliation pipeline from loaded tables to report-ready views.

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use rotation_map::canonicalize_columns;
use rotation_model::{
    Advisory, ArticleRecord, BrandRollup, CohortCounts, SummaryKpis, TopEntry, WeekSelection,
};
use tracing::{info, info_span, warn};

use crate::aggregate::{cohort_counts, rollup_by_brand, summary_kpis, top_by_revenue};
use crate::brand::build_brand_lookup;
use crate::error::Result;
use crate::frame::filter_by_banner;
use crate::narrate::narrate;
use crate::recap::{RecapOrigin, build_recap_table};
use crate::reconcile::{Lookups, build_depot_lookup, reconcile};
use crate::sales::aggregate_sales_by_identifier;
use crate::week::select_week;

/// Loaded source tables plus run parameters.
///
/// Tables may carry raw column names; the engine canonicalizes them.
#[derive(Debug, Clone)]
pub struct EngineInput {
    pub stock: DataFrame,
    pub sales: DataFrame,
    pub recap: DataFrame,
    pub depot: DataFrame,
    /// Target banner, e.g. `ELECTROPLANET`.
    pub banner: String,
    pub requested_week: Option<NaiveDate>,
    /// Run date, reported when sales carry no usable week.
    pub today: NaiveDate,
    pub top_n: usize,
    pub currency: String,
}

/// Everything the report and the console summary need.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub week: WeekSelection,
    pub recap_origin: RecapOrigin,
    pub records: Vec<ArticleRecord>,
    pub top: Vec<TopEntry>,
    pub brands: Vec<BrandRollup>,
    pub counts: CohortCounts,
    pub kpis: SummaryKpis,
    pub advisories: Vec<Advisory>,
    /// Recovered conditions the operator should know about.
    pub warnings: Vec<String>,
    pub unmatched_sales: usize,
}

/// Sales restricted to the target banner when the extract names banners.
pub fn banner_sales(sales: &DataFrame, banner: &str) -> Result<DataFrame> {
    match filter_by_banner(sales, banner)? {
        Some(filtered) => {
            if filtered.height() == 0 && sales.height() > 0 {
                warn!(banner, rows = sales.height(), "no sales rows for banner");
            }
            Ok(filtered)
        }
        None => Ok(sales.clone()),
    }
}

/// Runs reconciliation, aggregation and narration.
///
/// Fails only when no catalogue can be built.
pub fn run_engine(input: &EngineInput) -> Result<EngineOutput> {
    let span = info_span!("engine", banner = %input.banner);
    let _guard = span.enter();
    let start = Instant::now();

    let stock = canonicalize_columns(&input.stock);
    let sales = canonicalize_columns(&input.sales);
    let recap = canonicalize_columns(&input.recap);
    let depot = canonicalize_columns(&input.depot);

    let catalogue = build_recap_table(&recap, &stock, &input.banner)?;
    let mut warnings = Vec::new();
    if catalogue.origin == RecapOrigin::StockFallback {
        warnings.push(format!(
            "recap unusable; catalogue built from the {} rows of the stock extract",
            input.banner
        ));
    }

    let sales = banner_sales(&sales, &input.banner)?;
    let slice = select_week(&sales, input.requested_week, input.today)?;
    warnings.extend(slice.warnings.iter().cloned());
    let sales_by_id: BTreeMap<String, i64> = aggregate_sales_by_identifier(&slice.rows);

    let lookups = Lookups {
        brands: build_brand_lookup(&stock),
        depot: build_depot_lookup(&depot),
    };
    let outcome = reconcile(&catalogue.frame, &sales_by_id, &lookups);
    warnings.extend(outcome.warnings.iter().cloned());

    let records = outcome.records;
    let counts = cohort_counts(&records);
    let output = EngineOutput {
        week: slice.week,
        recap_origin: catalogue.origin,
        top: top_by_revenue(&records, input.top_n),
        brands: rollup_by_brand(&records),
        kpis: summary_kpis(&records),
        advisories: narrate(&records, &counts, &slice.week, &input.currency),
        counts,
        records,
        warnings,
        unmatched_sales: outcome.unmatched_sales,
    };

    info!(
        articles = output.records.len(),
        iso_week = output.week.iso_week(),
        revenue = output.kpis.total_revenue,
        warnings = output.warnings.len(),
        duration_ms = start.elapsed().as_millis(),
        "engine complete"
    );
    Ok(output)
}
