use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use rotation_ingest::{column_strings, parse_quantity};
use rotation_map::{ColumnResolution, Concept, column_names, normalize_identifier};
use tracing::{info, warn};

use crate::kpi::saturating_sum;

/// Sums units sold per normalized identifier over one week's sales rows.
///
/// Rows without identifier are skipped. A slice without identifier or
/// quantity column contributes nothing.
pub fn aggregate_sales_by_identifier(week_sales: &DataFrame) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    if week_sales.height() == 0 {
        return totals;
    }
    let resolution = ColumnResolution::resolve(
        "weekly_sales",
        &column_names(week_sales),
        &[Concept::Identifier, Concept::QuantitySold],
    );
    let (Some(id_column), Some(qty_column)) = (
        resolution.get(Concept::Identifier),
        resolution.get(Concept::QuantitySold),
    ) else {
        warn!("weekly sales lack identifier or quantity column; sales count as zero");
        return totals;
    };
    let ids = column_strings(week_sales, id_column).unwrap_or_default();
    let quantities = column_strings(week_sales, qty_column).unwrap_or_default();

    for (raw_id, raw_qty) in ids.iter().zip(quantities.iter()) {
        let identifier = normalize_identifier(raw_id);
        if identifier.is_empty() {
            continue;
        }
        let total = totals.entry(identifier).or_insert(0);
        *total = total.saturating_add(parse_quantity(raw_qty));
    }
    info!(
        rows = week_sales.height(),
        identifiers = totals.len(),
        units = saturating_sum(totals.values().copied()),
        "weekly sales aggregated"
    );
    totals
}
