//! Ranked and grouped views over reconciled records.

use std::collections::BTreeMap;

use rotation_model::{
    ArticleRecord, BrandRollup, CohortCounts, SalesMix, Status, SummaryKpis, TopEntry,
};

use crate::kpi::{BLOCKBUSTER_ROTATION, URGENT_COVERAGE_DAYS, round_to, saturating_sum};

/// Number of brands kept in the rollup.
pub const TOP_BRANDS: usize = 10;

/// Records ordered by weekly revenue, highest first; ties keep input order.
pub fn sorted_by_revenue(records: &[ArticleRecord]) -> Vec<&ArticleRecord> {
    let mut sorted: Vec<&ArticleRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.weekly_revenue.total_cmp(&a.weekly_revenue));
    sorted
}

/// The `n` best sellers by weekly revenue, ranked from 1.
pub fn top_by_revenue(records: &[ArticleRecord], n: usize) -> Vec<TopEntry> {
    sorted_by_revenue(records)
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(idx, record)| TopEntry {
            rank: idx + 1,
            identifier: record.identifier.clone(),
            brand: record.brand.clone(),
            description: record.description.clone(),
            weekly_revenue: record.weekly_revenue,
            weekly_units_sold: record.weekly_units_sold,
            status: record.status,
        })
        .collect()
}

/// Per-brand totals, the [`TOP_BRANDS`] brands selling the most units.
///
/// Ties on units are ordered by brand name.
pub fn rollup_by_brand(records: &[ArticleRecord]) -> Vec<BrandRollup> {
    let mut groups: BTreeMap<&str, (i64, i64, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(record.brand.as_str()).or_default();
        entry.0 = entry.0.saturating_add(record.weekly_units_sold);
        entry.1 = entry.1.saturating_add(record.total_stock);
        entry.2 += 1;
    }
    let mut rollups: Vec<BrandRollup> = groups
        .into_iter()
        .map(|(brand, (units, stock, count))| BrandRollup {
            brand: brand.to_string(),
            total_weekly_units_sold: units,
            total_stock: stock,
            article_count: count,
            rotation: if stock > 0 {
                round_to(units as f64 / stock as f64, 2)
            } else {
                0.0
            },
        })
        .collect();
    // BTreeMap order already sorts by brand; the stable sort keeps it for ties.
    rollups.sort_by(|a, b| b.total_weekly_units_sold.cmp(&a.total_weekly_units_sold));
    rollups.truncate(TOP_BRANDS);
    rollups
}

/// Article counts per status and per sales mix, zero entries included.
pub fn cohort_counts(records: &[ArticleRecord]) -> CohortCounts {
    let mut counts = CohortCounts::default();
    for status in Status::ALL {
        counts.by_status.insert(status, 0);
    }
    for mix in SalesMix::ALL {
        counts.by_mix.insert(mix, 0);
    }
    for record in records {
        *counts.by_status.entry(record.status).or_default() += 1;
        *counts.by_mix.entry(record.sales_mix).or_default() += 1;
    }
    counts
}

/// Headline totals of the dashboard.
pub fn summary_kpis(records: &[ArticleRecord]) -> SummaryKpis {
    SummaryKpis {
        total_revenue: records.iter().map(|r| r.weekly_revenue).sum(),
        total_stock_primary: saturating_sum(records.iter().map(|r| r.stock_primary)),
        total_stock_secondary: saturating_sum(records.iter().map(|r| r.stock_secondary)),
        total_units_sold: saturating_sum(records.iter().map(|r| r.weekly_units_sold)),
        urgent_count: records
            .iter()
            .filter(|r| r.coverage_days < URGENT_COVERAGE_DAYS)
            .count(),
        top_rotation_count: records
            .iter()
            .filter(|r| r.rotation > BLOCKBUSTER_ROTATION)
            .count(),
        article_count: records.len(),
    }
}
