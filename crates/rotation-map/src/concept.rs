//! Prioritized alias table for the business concepts found in the extracts.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::columns::{canonical_name, detect_column};

/// A business concept that different extracts name differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Concept {
    Identifier,
    Brand,
    Description,
    SalePrice,
    CostPrice,
    /// Shelf stock of the target banner, as named in the recap.
    StockPrimary,
    /// Stock quantity of a store stock extract.
    StockQuantity,
    /// Depot stock carried by the recap itself.
    StockSecondary,
    CumulativeSales,
    Banner,
    WeekStart,
    QuantitySold,
    /// Stock quantity of the secondary depot extract.
    DepotQuantity,
}

impl Concept {
    pub const ALL: [Concept; 13] = [
        Concept::Identifier,
        Concept::Brand,
        Concept::Description,
        Concept::SalePrice,
        Concept::CostPrice,
        Concept::StockPrimary,
        Concept::StockQuantity,
        Concept::StockSecondary,
        Concept::CumulativeSales,
        Concept::Banner,
        Concept::WeekStart,
        Concept::QuantitySold,
        Concept::DepotQuantity,
    ];

    /// Ordered pattern groups; earlier groups win over later ones.
    pub fn patterns(&self) -> &'static [&'static [&'static str]] {
        match self {
            Concept::Identifier => &[&["EAN"], &["GENCOD", "CODE BARRE", "BARCODE"], &["CODE ARTICLE"]],
            Concept::Brand => &[&["MARQUE"], &["BRAND"]],
            Concept::Description => &[
                &["LIBELLE EP", "LIBELLÉ EP"],
                &["LIBELLE ARTICLE", "LIBELLÉ ARTICLE", "DESIGNATION", "DÉSIGNATION"],
                &["DESCRIPTION"],
                &["LIBELLE", "LIBELLÉ"],
            ],
            Concept::SalePrice => &[
                &["P.VENTE", "P VENTE", "PRIX VENTE", "PRIX DE VENTE"],
                &["PVC", "PV TTC"],
            ],
            Concept::CostPrice => &[
                &["P.ACHAT", "P ACHAT", "PRIX ACHAT", "PRIX D'ACHAT"],
                &["PA HT", "COUT", "COÛT"],
            ],
            Concept::StockPrimary => &[&["STOCK EP", "STOCKEP", "STOC K EP"]],
            Concept::StockQuantity => &[
                &["STOCK EP", "STOCKEP"],
                &["QUANTITÉ", "QUANTITE", "QTE", "QTY"],
                &["STOCK"],
            ],
            Concept::StockSecondary => &[&["BURINTEL"], &["DEPOT", "DÉPÔT"]],
            Concept::CumulativeSales => &[&["CUMMUL", "CUMUL VENTE"], &["CUMULVENTE", "CUMUL"]],
            Concept::Banner => &[
                &["LIBELLÉ ENSEIGNE", "LIBELLE ENSEIGNE"],
                &["ENSEIGNE"],
                &["BANNER", "MAGASIN"],
            ],
            Concept::WeekStart => &[&["DÉBUT", "DEBUT"], &["DATE"], &["SEMAINE"]],
            Concept::QuantitySold => &[&["QUANTITÉ", "QUANTITE", "QTE"], &["QTY", "VENTES"]],
            Concept::DepotQuantity => &[&["STOCK"], &["QUANTITÉ", "QUANTITE", "QTE", "QTY"]],
        }
    }

    /// Substrings that disqualify a column for this concept.
    ///
    /// Keeps e.g. `LIBELLÉ ENSEIGNE` from being taken as a description.
    fn exclusions(&self) -> &'static [&'static str] {
        match self {
            Concept::Description => &["ENSEIGNE", "MARQUE"],
            Concept::StockQuantity | Concept::DepotQuantity => &["CUMUL", "VENTE"],
            Concept::QuantitySold => &["STOCK"],
            _ => &[],
        }
    }

    /// Detects this concept's column among `columns`.
    pub fn detect<S: AsRef<str>>(&self, columns: &[S]) -> Option<String> {
        let exclusions = self.exclusions();
        let eligible: Vec<&str> = columns
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| {
                let canonical = canonical_name(name);
                !exclusions.iter().any(|ex| canonical.contains(ex))
            })
            .collect();
        detect_column(&eligible, self.patterns())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Concept::Identifier => "identifier",
            Concept::Brand => "brand",
            Concept::Description => "description",
            Concept::SalePrice => "sale_price",
            Concept::CostPrice => "cost_price",
            Concept::StockPrimary => "stock_primary",
            Concept::StockQuantity => "stock_quantity",
            Concept::StockSecondary => "stock_secondary",
            Concept::CumulativeSales => "cumulative_sales",
            Concept::Banner => "banner",
            Concept::WeekStart => "week_start",
            Concept::QuantitySold => "quantity_sold",
            Concept::DepotQuantity => "depot_quantity",
        }
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concept-to-column assignments for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnResolution {
    columns: BTreeMap<Concept, String>,
}

impl ColumnResolution {
    /// Resolves each concept in `concepts` against `columns`.
    ///
    /// `source` only labels the debug output.
    pub fn resolve<S: AsRef<str>>(source: &str, columns: &[S], concepts: &[Concept]) -> Self {
        let mut resolved = BTreeMap::new();
        for concept in concepts {
            match concept.detect(columns) {
                Some(column) => {
                    debug!(source, concept = %concept, column = %column, "column detected");
                    resolved.insert(*concept, column);
                }
                None => debug!(source, concept = %concept, "column not found; using default"),
            }
        }
        Self { columns: resolved }
    }

    pub fn get(&self, concept: Concept) -> Option<&str> {
        self.columns.get(&concept).map(String::as_str)
    }

    pub fn contains(&self, concept: Concept) -> bool {
        self.columns.contains_key(&concept)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Concept, &str)> {
        self.columns.iter().map(|(k, v)| (*k, v.as_str()))
    }
}
