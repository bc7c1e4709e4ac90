use chrono::NaiveDate;

use rotation_model::{
    ArticleRecord, CohortCounts, SalesMix, SourceKind, Status, WeekOrigin, WeekSelection,
};

#[test]
fn status_parses_codes_and_labels() {
    assert_eq!("DEAD_STOCK".parse::<Status>(), Ok(Status::DeadStock));
    assert_eq!("to order".parse::<Status>(), Ok(Status::ToOrder));
    assert_eq!(" blockbuster ".parse::<Status>(), Ok(Status::Blockbuster));
    assert!("HOT".parse::<Status>().is_err());
}

#[test]
fn status_codes_round_trip_through_display() {
    for status in Status::ALL {
        assert_eq!(status.to_string().parse::<Status>(), Ok(status));
    }
}

#[test]
fn source_kind_patterns_and_sheets() {
    assert_eq!(SourceKind::Stock.default_pattern(), "ExcelStock-*.xlsx");
    assert_eq!(SourceKind::WeeklySales.preferred_sheet(), Some("Ventes hebdomadaires"));
    assert_eq!(SourceKind::Recap.preferred_sheet(), None);
    assert_eq!("depot".parse::<SourceKind>(), Ok(SourceKind::SecondaryDepot));
    assert_eq!("weekly-sales".parse::<SourceKind>(), Ok(SourceKind::WeeklySales));
}

#[test]
fn week_selection_reports_iso_week() {
    let start = NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date");
    let week = WeekSelection::new(start, WeekOrigin::Latest);
    assert_eq!(week.iso_week(), 10);
    assert_eq!(week.display_date(), "04/03/2024");
}

#[test]
fn immobilized_value_uses_primary_stock_and_cost() {
    let mut record = ArticleRecord::new("0000000000007");
    record.stock_primary = 12;
    record.stock_secondary = 100;
    record.unit_cost_price = 2.5;
    assert!((record.immobilized_value() - 30.0).abs() < 1e-9);
}

#[test]
fn cohort_counts_default_to_zero() {
    let mut counts = CohortCounts::default();
    counts.by_status.insert(Status::Urgent, 3);
    counts.by_mix.insert(SalesMix::Idle, 2);
    assert_eq!(counts.status(Status::Urgent), 3);
    assert_eq!(counts.status(Status::DeadStock), 0);
    assert_eq!(counts.mix(SalesMix::Idle), 2);
    assert_eq!(counts.mix(SalesMix::Absent), 0);
    assert_eq!(counts.total(), 3);
}
