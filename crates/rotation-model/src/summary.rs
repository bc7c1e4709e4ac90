//! Derived, read-only views over the reconciled records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::article::{SalesMix, Status};

/// One line of the ranked top-by-revenue view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEntry {
    /// 1-based rank.
    pub rank: usize,
    pub identifier: String,
    pub brand: String,
    pub description: String,
    pub weekly_revenue: f64,
    pub weekly_units_sold: i64,
    pub status: Status,
}

impl TopEntry {
    /// Rank label as printed in reports (`#1`, `#2`, ...).
    pub fn rank_label(&self) -> String {
        format!("#{}", self.rank)
    }
}

/// Per-brand rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandRollup {
    pub brand: String,
    pub total_weekly_units_sold: i64,
    pub total_stock: i64,
    pub article_count: usize,
    /// `units / stock` when stock is positive, else 0.
    pub rotation: f64,
}

/// Number of articles per status and per sales mix category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CohortCounts {
    pub by_status: BTreeMap<Status, usize>,
    pub by_mix: BTreeMap<SalesMix, usize>,
}

impl CohortCounts {
    pub fn status(&self, status: Status) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn mix(&self, mix: SalesMix) -> usize {
        self.by_mix.get(&mix).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.by_status.values().sum()
    }
}

/// Headline figures of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryKpis {
    pub total_revenue: f64,
    pub total_stock_primary: i64,
    pub total_stock_secondary: i64,
    pub total_units_sold: i64,
    /// Articles under 14 days of cover.
    pub urgent_count: usize,
    /// Articles rotating faster than 0.5 per week.
    pub top_rotation_count: usize,
    pub article_count: usize,
}

/// One advisory line of the recommendations region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub label: String,
    pub text: String,
}

impl Advisory {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}
