//! Input source kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One logical upstream extract.
///
/// Each kind maps to exactly one glob pattern and at most one selected file
/// per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Store stock extract, all banners (`ExcelStock-*.xlsx`).
    Stock,
    /// Weekly sales extract (`ExcelVenteHebdo-*.xlsx`).
    WeeklySales,
    /// Catalogue recap maintained by the category team (`*RECAP*.xlsx`).
    Recap,
    /// Optional secondary depot stock extract.
    SecondaryDepot,
}

impl SourceKind {
    /// All kinds in discovery order.
    pub const ALL: [SourceKind; 4] = [
        SourceKind::Stock,
        SourceKind::WeeklySales,
        SourceKind::Recap,
        SourceKind::SecondaryDepot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Stock => "stock",
            SourceKind::WeeklySales => "weekly_sales",
            SourceKind::Recap => "recap",
            SourceKind::SecondaryDepot => "secondary_depot",
        }
    }

    /// File name pattern used when the configuration does not override it.
    pub fn default_pattern(&self) -> &'static str {
        match self {
            SourceKind::Stock => "ExcelStock-*.xlsx",
            SourceKind::WeeklySales => "ExcelVenteHebdo-*.xlsx",
            SourceKind::Recap => "*RECAP*.xlsx",
            SourceKind::SecondaryDepot => "*BURINTEL*.xlsx",
        }
    }

    /// Preferred sheet name, if the extract has a fixed one.
    pub fn preferred_sheet(&self) -> Option<&'static str> {
        match self {
            SourceKind::Stock => Some("Stock"),
            SourceKind::WeeklySales => Some("Ventes hebdomadaires"),
            SourceKind::Recap | SourceKind::SecondaryDepot => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "stock" => Ok(SourceKind::Stock),
            "weekly_sales" | "sales" => Ok(SourceKind::WeeklySales),
            "recap" => Ok(SourceKind::Recap),
            "secondary_depot" | "depot" => Ok(SourceKind::SecondaryDepot),
            _ => Err(format!("Unknown source kind: {s}")),
        }
    }
}
