//! Shared data model for the rotation dashboard crates.

pub mod article;
pub mod source;
pub mod summary;
pub mod week;

pub use article::{
    ArticleRecord, COVERAGE_SENTINEL, DEFAULT_BRAND, DEFAULT_DESCRIPTION, IDENTIFIER_WIDTH,
    SalesMix, Status,
};
pub use source::SourceKind;
pub use summary::{Advisory, BrandRollup, CohortCounts, SummaryKpis, TopEntry};
pub use week::{WeekOrigin, WeekSelection};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_has_no_undefined_kpis() {
        let record = ArticleRecord::new("0000000000001");
        assert_eq!(record.weekly_units_sold, 0);
        assert_eq!(record.coverage_days, COVERAGE_SENTINEL);
        assert_eq!(record.brand, DEFAULT_BRAND);
        assert_eq!(record.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn record_serializes() {
        let record = ArticleRecord::new("0000000000042");
        let json = serde_json::to_string(&record).expect("serialize record");
        assert!(json.contains("\"status\":\"STABLE\""));
        let round: ArticleRecord = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round.identifier, "0000000000042");
    }
}
