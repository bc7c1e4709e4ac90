//! Brand resolution cascade.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use rotation_ingest::column_strings;
use rotation_map::{ColumnResolution, Concept, column_names, normalize_identifier};
use rotation_model::DEFAULT_BRAND;

/// Brand tokens recognised in free-text descriptions, scanned in order.
pub const KNOWN_BRANDS: &[&str] = &[
    "SAMSUNG", "APPLE", "IPHONE", "HUAWEI", "XIAOMI", "REDMI", "OPPO", "REALME", "HONOR", "NOKIA",
    "TECNO", "INFINIX", "MOTOROLA", "SONY", "PHILIPS", "LENOVO", "ASUS", "DELL", "ACER", "MSI",
    "HISENSE", "TCL", "TOSHIBA", "PANASONIC", "BOSCH", "SIEMENS", "WHIRLPOOL", "BEKO", "CANDY",
    "MOULINEX", "TEFAL", "ROWENTA", "BRAUN", "KENWOOD", "DELONGHI", "JBL", "CANON", "EPSON",
    "NINTENDO", "LG", "HP",
];

/// Token collapsed onto a brand name during the keyword scan.
const ALIASES: [(&str, &str); 1] = [("IPHONE", "APPLE")];

/// Brand values that carry no information.
const PLACEHOLDERS: [&str; 7] = ["NC", "0", "UNKNOWN", "NAN", "NONE", "NULL", "N/A"];

/// Brand per identifier, taken from the stock extract.
pub type BrandLookup = BTreeMap<String, String>;

/// Returns the usable brand text, or `None` for blanks and placeholders.
pub fn meaningful_brand(raw: &str) -> Option<String> {
    let value = raw.trim().to_uppercase();
    if value.is_empty() || PLACEHOLDERS.contains(&value.as_str()) {
        None
    } else {
        Some(value)
    }
}

/// Builds the identifier-to-brand table from the stock extract, all banners.
///
/// The first meaningful brand seen for an identifier is kept.
pub fn build_brand_lookup(stock: &DataFrame) -> BrandLookup {
    let mut lookup = BrandLookup::new();
    let resolution = ColumnResolution::resolve(
        "stock_brands",
        &column_names(stock),
        &[Concept::Identifier, Concept::Brand],
    );
    let (Some(id_column), Some(brand_column)) = (
        resolution.get(Concept::Identifier),
        resolution.get(Concept::Brand),
    ) else {
        return lookup;
    };
    let ids = column_strings(stock, id_column).unwrap_or_default();
    let brands = column_strings(stock, brand_column).unwrap_or_default();
    for (raw_id, raw_brand) in ids.iter().zip(brands.iter()) {
        let identifier = normalize_identifier(raw_id);
        if identifier.is_empty() {
            continue;
        }
        if let Some(brand) = meaningful_brand(raw_brand) {
            lookup.entry(identifier).or_insert(brand);
        }
    }
    lookup
}

/// Short tokens like `LG` or `HP` must match a whole word; longer ones may
/// appear anywhere.
fn mentions(text: &str, token: &str) -> bool {
    if token.len() <= 3 {
        text.split(|c: char| !c.is_alphanumeric())
            .any(|word| word == token)
    } else {
        text.contains(token)
    }
}

/// Scans a description for a known brand token.
pub fn brand_from_description(description: &str) -> Option<String> {
    let text = description.to_uppercase();
    KNOWN_BRANDS
        .iter()
        .find(|token| mentions(&text, token))
        .map(|token| {
            ALIASES
                .iter()
                .find(|(alias, _)| alias == token)
                .map_or(*token, |(_, brand)| *brand)
                .to_string()
        })
}

/// Resolves an article's brand.
///
/// Explicit field, then the stock lookup by identifier, then a keyword scan
/// of the description, then [`DEFAULT_BRAND`].
pub fn resolve_brand(explicit: &str, identifier: &str, description: &str, lookup: &BrandLookup) -> String {
    meaningful_brand(explicit)
        .or_else(|| lookup.get(identifier).cloned())
        .or_else(|| brand_from_description(description))
        .unwrap_or_else(|| DEFAULT_BRAND.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_order() {
        let mut lookup = BrandLookup::new();
        lookup.insert("0000000000001".into(), "LG".into());

        assert_eq!(resolve_brand("sony", "0000000000001", "", &lookup), "SONY");
        assert_eq!(resolve_brand("NC", "0000000000001", "SAMSUNG TV", &lookup), "LG");
        assert_eq!(resolve_brand("0", "0000000000002", "Samsung Galaxy A15", &lookup), "SAMSUNG");
        assert_eq!(resolve_brand("", "0000000000002", "Cable USB", &lookup), DEFAULT_BRAND);
    }

    #[test]
    fn iphone_collapses_to_apple() {
        assert_eq!(brand_from_description("iPhone 15 128GB").as_deref(), Some("APPLE"));
    }

    #[test]
    fn short_tokens_need_word_boundaries() {
        assert_eq!(brand_from_description("Ecran LG 27 pouces").as_deref(), Some("LG"));
        assert_eq!(brand_from_description("BULGARIAN YOGURT MAKER"), None);
        assert_eq!(brand_from_description("Imprimante HP DeskJet").as_deref(), Some("HP"));
    }
}
