//! Restocking recommendations derived from the classified records.

use rotation_model::{Advisory, ArticleRecord, CohortCounts, SalesMix, Status, WeekSelection};

use crate::aggregate::sorted_by_revenue;
use crate::format::{format_amount, format_thousands};
use crate::kpi::{BLOCKBUSTER_ROTATION, saturating_sum};

/// Articles listed per highlighted category.
const HIGHLIGHTS: usize = 3;

fn article_label(record: &ArticleRecord) -> String {
    format!("{} {} ({})", record.brand, record.description, record.identifier)
}

fn fast_movers(records: &[ArticleRecord]) -> Vec<&ArticleRecord> {
    sorted_by_revenue(records)
        .into_iter()
        .filter(|r| r.rotation > BLOCKBUSTER_ROTATION)
        .collect()
}

/// Builds the ordered advisory lines of the recommendations region.
///
/// Pure: the same records always yield the same lines.
pub fn narrate(
    records: &[ArticleRecord],
    counts: &CohortCounts,
    week: &WeekSelection,
    currency: &str,
) -> Vec<Advisory> {
    let mut lines = Vec::new();

    let revenue: f64 = records.iter().map(|r| r.weekly_revenue).sum();
    let units = saturating_sum(records.iter().map(|r| r.weekly_units_sold));
    let shelf = saturating_sum(records.iter().map(|r| r.stock_primary));
    let depot = saturating_sum(records.iter().map(|r| r.stock_secondary));
    lines.push(Advisory::new(
        "OVERVIEW",
        format!(
            "Week W{:02} starting {}: {} articles, {} units sold, revenue {}, shelf stock {} units, depot stock {} units.",
            week.iso_week(),
            week.display_date(),
            records.len(),
            format_thousands(units as f64),
            format_amount(revenue, currency),
            format_thousands(shelf as f64),
            format_thousands(depot as f64),
        ),
    ));

    let urgent: Vec<&ArticleRecord> = sorted_by_revenue(records)
        .into_iter()
        .filter(|r| r.status == Status::Urgent)
        .take(HIGHLIGHTS)
        .collect();
    for (idx, record) in urgent.iter().enumerate() {
        lines.push(Advisory::new(
            format!("URGENT #{}", idx + 1),
            format!(
                "{}: stock {}, sold {}, coverage {:.1} days.",
                article_label(record),
                record.stock_primary,
                record.weekly_units_sold,
                record.coverage_days
            ),
        ));
    }

    let mut dead: Vec<&ArticleRecord> = records
        .iter()
        .filter(|r| r.status == Status::DeadStock)
        .collect();
    if !dead.is_empty() {
        let immobilized: f64 = dead.iter().map(|r| r.immobilized_value()).sum();
        lines.push(Advisory::new(
            "DEAD STOCK",
            format!(
                "{} articles without sales immobilize {}.",
                dead.len(),
                format_amount(immobilized, currency)
            ),
        ));
        dead.sort_by(|a, b| b.immobilized_value().total_cmp(&a.immobilized_value()));
        for (idx, record) in dead.iter().take(HIGHLIGHTS).enumerate() {
            lines.push(Advisory::new(
                format!("DEAD STOCK #{}", idx + 1),
                format!(
                    "{}: {} units, {} immobilized.",
                    article_label(record),
                    record.stock_primary,
                    format_amount(record.immobilized_value(), currency)
                ),
            ));
        }
    }

    let movers = fast_movers(records);
    for (idx, record) in movers.iter().take(HIGHLIGHTS).enumerate() {
        lines.push(Advisory::new(
            format!("TOP ROTATION #{}", idx + 1),
            format!(
                "{}: sold {}, revenue {}, rotation {:.2}.",
                article_label(record),
                record.weekly_units_sold,
                format_amount(record.weekly_revenue, currency),
                record.rotation
            ),
        ));
    }

    let plan: Vec<String> = [
        (
            counts.status(Status::Urgent),
            "urgent articles: reorder now, under 14 days of cover.",
        ),
        (
            counts.status(Status::ToOrder),
            "articles between 14 and 28 days of cover: plan the next order.",
        ),
        (
            counts.mix(SalesMix::Stockout),
            "selling articles with an empty shelf: restock from the depot.",
        ),
        (
            counts.status(Status::DeadStock),
            "dead-stock articles: clear through promotion or transfer.",
        ),
        (
            movers.len().max(counts.status(Status::Blockbuster)),
            "fast movers: secure supply to avoid stockouts.",
        ),
    ]
    .into_iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, text)| format!("{count} {text}"))
    .collect();

    if plan.is_empty() {
        lines.push(Advisory::new(
            "ACTION",
            "No cohort needs attention this week: routine monitoring.",
        ));
    } else {
        for (idx, text) in plan.into_iter().enumerate() {
            lines.push(Advisory::new(format!("ACTION {}", idx + 1), text));
        }
    }
    lines
}
