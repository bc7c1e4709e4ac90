//! Merge of the catalogue universe with weekly sales and depot stock.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use rotation_ingest::{column_strings, parse_amount, parse_quantity};
use rotation_map::{ColumnResolution, Concept, column_names, normalize_identifier};
use rotation_model::{ArticleRecord, DEFAULT_DESCRIPTION};
use tracing::{info, warn};

use crate::brand::{BrandLookup, resolve_brand};
use crate::kpi::derive_kpis;

/// Concepts read from the catalogue table.
const RECAP_CONCEPTS: [Concept; 8] = [
    Concept::Identifier,
    Concept::Brand,
    Concept::Description,
    Concept::SalePrice,
    Concept::CostPrice,
    Concept::StockPrimary,
    Concept::StockSecondary,
    Concept::CumulativeSales,
];

/// Secondary depot stock for one identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepotEntry {
    pub quantity: i64,
    pub description: String,
}

pub type DepotLookup = BTreeMap<String, DepotEntry>;

/// Side tables joined onto the catalogue by identifier.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    pub brands: BrandLookup,
    pub depot: DepotLookup,
}

/// Sums the depot extract per identifier, keeping the first description.
pub fn build_depot_lookup(depot: &DataFrame) -> DepotLookup {
    let mut lookup = DepotLookup::new();
    if depot.height() == 0 {
        return lookup;
    }
    let resolution = ColumnResolution::resolve(
        "secondary_depot",
        &column_names(depot),
        &[Concept::Identifier, Concept::DepotQuantity, Concept::Description],
    );
    let Some(id_column) = resolution.get(Concept::Identifier) else {
        warn!("depot extract has no identifier column; depot stock counts as zero");
        return lookup;
    };
    let height = depot.height();
    let ids = column_strings(depot, id_column).unwrap_or_default();
    let quantities = resolution
        .get(Concept::DepotQuantity)
        .and_then(|column| column_strings(depot, column))
        .unwrap_or_else(|| vec![String::new(); height]);
    let descriptions = resolution
        .get(Concept::Description)
        .and_then(|column| column_strings(depot, column))
        .unwrap_or_else(|| vec![String::new(); height]);

    for ((raw_id, raw_qty), description) in ids.iter().zip(&quantities).zip(&descriptions) {
        let identifier = normalize_identifier(raw_id);
        if identifier.is_empty() {
            continue;
        }
        let entry = lookup.entry(identifier).or_default();
        entry.quantity = entry.quantity.saturating_add(parse_quantity(raw_qty));
        if entry.description.is_empty() {
            entry.description = description.trim().to_string();
        }
    }
    lookup
}

/// Result of [`reconcile`].
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    /// One record per catalogue identifier, in catalogue order.
    pub records: Vec<ArticleRecord>,
    /// Identifiers with sales this week that the catalogue does not track.
    pub unmatched_sales: usize,
    /// Units sold under those identifiers.
    pub unmatched_units: i64,
    pub warnings: Vec<String>,
}

/// Raw catalogue values accumulated across duplicate rows.
#[derive(Debug, Default)]
struct Draft {
    identifier: String,
    brand: String,
    description: String,
    sale_price: f64,
    cost_price: f64,
    stock_primary: i64,
    stock_secondary: i64,
    cumulative: i64,
}

fn first_non_empty(slot: &mut String, value: &str) {
    if slot.is_empty() {
        *slot = value.trim().to_string();
    }
}

fn first_non_zero(slot: &mut f64, value: f64) {
    if *slot == 0.0 {
        *slot = value;
    }
}

/// Column values for `concept`, or blanks when the catalogue lacks it.
fn concept_values(df: &DataFrame, resolution: &ColumnResolution, concept: Concept) -> Vec<String> {
    resolution
        .get(concept)
        .and_then(|column| column_strings(df, column))
        .unwrap_or_else(|| vec![String::new(); df.height()])
}

/// Builds one record per catalogue identifier.
///
/// Duplicate catalogue rows are summed (quantities) or coalesced
/// (descriptive fields, prices) before the merge. Identifiers missing from
/// `sales` sell zero. Sales for identifiers outside the catalogue are
/// dropped and counted in the outcome.
pub fn reconcile(recap: &DataFrame, sales: &BTreeMap<String, i64>, lookups: &Lookups) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();
    let resolution = ColumnResolution::resolve("recap", &column_names(recap), &RECAP_CONCEPTS);

    let ids = concept_values(recap, &resolution, Concept::Identifier);
    let brands = concept_values(recap, &resolution, Concept::Brand);
    let descriptions = concept_values(recap, &resolution, Concept::Description);
    let sale_prices = concept_values(recap, &resolution, Concept::SalePrice);
    let cost_prices = concept_values(recap, &resolution, Concept::CostPrice);
    let stock_primary = concept_values(recap, &resolution, Concept::StockPrimary);
    let stock_secondary = concept_values(recap, &resolution, Concept::StockSecondary);
    let cumulative = concept_values(recap, &resolution, Concept::CumulativeSales);
    let depot_from_recap = resolution.contains(Concept::StockSecondary);

    let mut drafts: Vec<Draft> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    let mut blank_ids = 0usize;
    let mut duplicate_rows = 0usize;

    for row in 0..ids.len() {
        let identifier = normalize_identifier(&ids[row]);
        if identifier.is_empty() {
            blank_ids += 1;
            continue;
        }
        let slot = match index.get(&identifier) {
            Some(&slot) => {
                duplicate_rows += 1;
                slot
            }
            None => {
                index.insert(identifier.clone(), drafts.len());
                drafts.push(Draft {
                    identifier,
                    ..Draft::default()
                });
                drafts.len() - 1
            }
        };
        let draft = &mut drafts[slot];
        first_non_empty(&mut draft.brand, &brands[row]);
        first_non_empty(&mut draft.description, &descriptions[row]);
        first_non_zero(&mut draft.sale_price, parse_amount(&sale_prices[row]));
        first_non_zero(&mut draft.cost_price, parse_amount(&cost_prices[row]));
        draft.stock_primary = draft.stock_primary.saturating_add(parse_quantity(&stock_primary[row]));
        draft.stock_secondary = draft.stock_secondary.saturating_add(parse_quantity(&stock_secondary[row]));
        draft.cumulative = draft.cumulative.saturating_add(parse_quantity(&cumulative[row]));
    }

    if blank_ids > 0 {
        outcome
            .warnings
            .push(format!("{blank_ids} catalogue rows without identifier were skipped"));
    }
    if duplicate_rows > 0 {
        info!(duplicate_rows, "duplicate catalogue rows merged");
    }

    outcome.records = drafts
        .into_iter()
        .map(|draft| finish_record(draft, sales, lookups, depot_from_recap))
        .collect();

    let (unmatched, units) = sales
        .iter()
        .filter(|(identifier, _)| !index.contains_key(*identifier))
        .fold((0usize, 0i64), |(count, total), (_, units)| (count + 1, total.saturating_add(*units)));
    if unmatched > 0 {
        let message = format!(
            "{unmatched} identifiers with sales this week ({units} units) are not in the catalogue and were dropped"
        );
        warn!(unmatched, units, "sales outside catalogue dropped");
        outcome.warnings.push(message);
    }
    outcome.unmatched_sales = unmatched;
    outcome.unmatched_units = units;

    info!(
        articles = outcome.records.len(),
        matched_sales = sales.len() - unmatched,
        "catalogue reconciled"
    );
    outcome
}

fn finish_record(
    draft: Draft,
    sales: &BTreeMap<String, i64>,
    lookups: &Lookups,
    depot_from_recap: bool,
) -> ArticleRecord {
    let depot = lookups.depot.get(&draft.identifier);
    let mut description = draft.description;
    if description.is_empty() {
        if let Some(entry) = depot {
            description = entry.description.clone();
        }
    }
    if description.is_empty() {
        description = DEFAULT_DESCRIPTION.to_string();
    }

    let mut record = ArticleRecord::new(draft.identifier);
    record.brand = resolve_brand(&draft.brand, &record.identifier, &description, &lookups.brands);
    record.description = description;
    record.unit_sale_price = draft.sale_price;
    record.unit_cost_price = draft.cost_price;
    record.stock_primary = draft.stock_primary;
    record.stock_secondary = if depot_from_recap {
        draft.stock_secondary
    } else {
        depot.map(|entry| entry.quantity).unwrap_or(0)
    };
    record.cumulative_units_sold = draft.cumulative;
    record.weekly_units_sold = sales.get(&record.identifier).copied().unwrap_or(0).max(0);
    derive_kpis(&mut record);
    record
}
