//! Catalogue universe: the recap extract, or the banner's stock as fallback.

use polars::prelude::DataFrame;
use rotation_ingest::{column_strings, string_frame};
use rotation_map::{ColumnResolution, Concept, column_names};
use tracing::{info, warn};

use crate::error::{CoreError, Result};
use crate::frame::filter_by_banner;

/// Column names of the recap schema the stock fallback is renamed into.
pub const RECAP_SCHEMA: [(Concept, &str); 6] = [
    (Concept::Identifier, "EAN"),
    (Concept::Brand, "MARQUE"),
    (Concept::Description, "LIBELLE"),
    (Concept::SalePrice, "P.VENTE"),
    (Concept::CostPrice, "P.ACHAT"),
    (Concept::StockQuantity, "STOCK EP"),
];

/// Where the catalogue universe came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecapOrigin {
    Recap,
    StockFallback,
}

/// The table that defines which articles are tracked.
#[derive(Debug, Clone)]
pub struct RecapTable {
    pub frame: DataFrame,
    pub origin: RecapOrigin,
}

fn is_usable(df: &DataFrame) -> bool {
    df.height() > 0 && Concept::Identifier.detect(&column_names(df)).is_some()
}

/// Picks the recap, falling back to the banner's rows of the stock extract.
///
/// Both inputs are expected with canonicalized column names. The fallback
/// applies whenever the recap is unusable (empty or without an identifier
/// column), not only when it is missing.
pub fn build_recap_table(recap: &DataFrame, stock: &DataFrame, banner: &str) -> Result<RecapTable> {
    if is_usable(recap) {
        info!(rows = recap.height(), "catalogue taken from recap");
        return Ok(RecapTable {
            frame: recap.clone(),
            origin: RecapOrigin::Recap,
        });
    }
    warn!(banner, "recap unusable; falling back to stock extract");
    let fallback = stock_to_recap_schema(stock, banner)?;
    if fallback.height() == 0 {
        return Err(CoreError::NoCatalogData {
            banner: banner.to_string(),
        });
    }
    info!(rows = fallback.height(), "catalogue taken from stock fallback");
    Ok(RecapTable {
        frame: fallback,
        origin: RecapOrigin::StockFallback,
    })
}

/// Restricts the stock extract to `banner` and renames it into [`RECAP_SCHEMA`].
///
/// Concepts the stock extract lacks become empty columns. A stock extract
/// without banner or identifier column yields an empty frame.
pub fn stock_to_recap_schema(stock: &DataFrame, banner: &str) -> Result<DataFrame> {
    if stock.height() == 0 {
        return Ok(DataFrame::empty());
    }
    let Some(filtered) = filter_by_banner(stock, banner)? else {
        warn!("stock extract has no banner column; fallback unavailable");
        return Ok(DataFrame::empty());
    };
    let concepts: Vec<Concept> = RECAP_SCHEMA.iter().map(|(concept, _)| *concept).collect();
    let resolution = ColumnResolution::resolve("stock", &column_names(&filtered), &concepts);
    if !resolution.contains(Concept::Identifier) {
        warn!("stock extract has no identifier column; fallback unavailable");
        return Ok(DataFrame::empty());
    }

    let height = filtered.height();
    let headers: Vec<String> = RECAP_SCHEMA.iter().map(|(_, name)| name.to_string()).collect();
    let columns: Vec<Vec<String>> = RECAP_SCHEMA
        .iter()
        .map(|(concept, _)| {
            resolution
                .get(*concept)
                .and_then(|column| column_strings(&filtered, column))
                .unwrap_or_else(|| vec![String::new(); height])
        })
        .collect();
    let rows: Vec<Vec<String>> = (0..height)
        .map(|idx| columns.iter().map(|values| values[idx].clone()).collect())
        .collect();
    Ok(string_frame(&headers, &rows)?)
}
