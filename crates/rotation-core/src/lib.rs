//! Reconciliation-and-derivation engine of the rotation dashboard.
//!
//! Stages, each a function of the previous stage's output:
//! 1. **Catalogue**: recap extract, or the banner's stock as fallback
//! 2. **Week**: pick the reporting week and slice the weekly sales
//! 3. **Reconcile**: one record per catalogue identifier, sales merged in
//! 4. **Derive**: revenue, rotation, coverage and status per record
//! 5. **Aggregate**: top sellers, brand rollup, cohort counts
//! 6. **Narrate**: restocking recommendations

pub mod aggregate;
pub mod brand;
pub mod engine;
pub mod error;
pub mod format;
pub mod frame;
pub mod kpi;
pub mod narrate;
pub mod recap;
pub mod reconcile;
pub mod sales;
pub mod week;

pub use aggregate::{cohort_counts, rollup_by_brand, sorted_by_revenue, summary_kpis, top_by_revenue};
pub use brand::{BrandLookup, KNOWN_BRANDS, build_brand_lookup, resolve_brand};
pub use engine::{EngineInput, EngineOutput, banner_sales, run_engine};
pub use error::{CoreError, Result};
pub use format::{format_amount, format_thousands, format_units};
pub use kpi::{classify, derive_kpis, round_to, sales_mix, saturating_sum};
pub use narrate::narrate;
pub use recap::{RECAP_SCHEMA, RecapOrigin, RecapTable, build_recap_table, stock_to_recap_schema};
pub use reconcile::{DepotEntry, DepotLookup, Lookups, ReconcileOutcome, build_depot_lookup, reconcile};
pub use sales::aggregate_sales_by_identifier;
pub use week::{WeekSlice, available_weeks, parse_week_date, select_week};
