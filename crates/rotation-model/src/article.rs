//! Reconciled per-article record and its classifications.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coverage reported for articles with no sales in the selected week.
pub const COVERAGE_SENTINEL: f64 = 999.0;

/// Width of a normalized product identifier.
pub const IDENTIFIER_WIDTH: usize = 13;

/// Brand used when no resolution step produced one.
pub const DEFAULT_BRAND: &str = "Other";

/// Description used when no source carries one.
pub const DEFAULT_DESCRIPTION: &str = "Article";

/// Restocking status, decided by ordered rules (first match wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// No sales this week and more than 10 units on the shelf.
    DeadStock,
    /// Less than 14 days of cover.
    Urgent,
    /// Between 14 and 28 days of cover.
    ToOrder,
    /// Weekly rotation above 0.5.
    Blockbuster,
    Stable,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::DeadStock,
        Status::Urgent,
        Status::ToOrder,
        Status::Blockbuster,
        Status::Stable,
    ];

    /// Machine code, e.g. `DEAD_STOCK`.
    pub fn as_code(&self) -> &'static str {
        match self {
            Status::DeadStock => "DEAD_STOCK",
            Status::Urgent => "URGENT",
            Status::ToOrder => "TO_ORDER",
            Status::Blockbuster => "BLOCKBUSTER",
            Status::Stable => "STABLE",
        }
    }

    /// Label shown in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Status::DeadStock => "DEAD STOCK",
            Status::Urgent => "URGENT",
            Status::ToOrder => "TO ORDER",
            Status::Blockbuster => "BLOCKBUSTER",
            Status::Stable => "STABLE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl FromStr for Status {
    type Err = String;

    /// Accepts codes and labels, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(' ', "_");
        Status::ALL
            .into_iter()
            .find(|status| status.as_code() == normalized)
            .ok_or_else(|| format!("Unknown status: {s}"))
    }
}

/// Finer sales/stock mix used by the summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalesMix {
    /// Selling with a comfortable shelf stock.
    Active,
    /// Selling with fewer than 5 units left.
    Critical,
    /// Selling with no shelf stock at all.
    Stockout,
    /// Stocked but not selling.
    Idle,
    /// Neither stocked nor selling.
    Absent,
}

impl SalesMix {
    pub const ALL: [SalesMix; 5] = [
        SalesMix::Active,
        SalesMix::Critical,
        SalesMix::Stockout,
        SalesMix::Idle,
        SalesMix::Absent,
    ];

    pub fn as_code(&self) -> &'static str {
        match self {
            SalesMix::Active => "ACTIVE",
            SalesMix::Critical => "CRITICAL",
            SalesMix::Stockout => "STOCKOUT",
            SalesMix::Idle => "IDLE",
            SalesMix::Absent => "ABSENT",
        }
    }
}

impl fmt::Display for SalesMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// One catalogued article after reconciliation.
///
/// Every numeric field is always defined: a value missing from every
/// source is zero (or the coverage sentinel), never absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Zero-padded identifier, the join key across sources.
    pub identifier: String,
    pub brand: String,
    pub description: String,
    pub unit_sale_price: f64,
    pub unit_cost_price: f64,
    /// Shelf stock of the target banner.
    pub stock_primary: i64,
    /// Stock held in the secondary depot.
    pub stock_secondary: i64,
    pub weekly_units_sold: i64,
    /// Running sales counter carried by the recap, informational only.
    pub cumulative_units_sold: i64,
    pub weekly_revenue: f64,
    pub total_stock: i64,
    pub rotation: f64,
    pub coverage_days: f64,
    pub status: Status,
    pub sales_mix: SalesMix,
}

impl ArticleRecord {
    /// Creates a record with every numeric field at zero.
    ///
    /// Derived fields must be recomputed once the raw fields are filled.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            brand: DEFAULT_BRAND.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            unit_sale_price: 0.0,
            unit_cost_price: 0.0,
            stock_primary: 0,
            stock_secondary: 0,
            weekly_units_sold: 0,
            cumulative_units_sold: 0,
            weekly_revenue: 0.0,
            total_stock: 0,
            rotation: 0.0,
            coverage_days: COVERAGE_SENTINEL,
            status: Status::Stable,
            sales_mix: SalesMix::Absent,
        }
    }

    /// Value tied up in unsold shelf stock.
    pub fn immobilized_value(&self) -> f64 {
        self.stock_primary as f64 * self.unit_cost_price
    }

    pub fn is_selling(&self) -> bool {
        self.weekly_units_sold > 0
    }
}
