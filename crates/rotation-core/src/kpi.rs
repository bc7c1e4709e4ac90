//! Per-article KPI derivation and status classification.

use rotation_model::{ArticleRecord, COVERAGE_SENTINEL, SalesMix, Status};

/// Units of shelf stock above which an unsold article is dead stock.
pub const DEAD_STOCK_MIN_UNITS: i64 = 10;
/// Days of cover under which an article is urgent.
pub const URGENT_COVERAGE_DAYS: f64 = 14.0;
/// Days of cover under which an article should be ordered.
pub const ORDER_COVERAGE_DAYS: f64 = 28.0;
/// Weekly rotation above which an article is a blockbuster.
pub const BLOCKBUSTER_ROTATION: f64 = 0.5;
/// Shelf stock under which a selling article is critical.
pub const CRITICAL_STOCK_UNITS: i64 = 5;

/// Sums unit counts, pinning at `i64::MAX` instead of overflowing.
pub fn saturating_sum<I: IntoIterator<Item = i64>>(values: I) -> i64 {
    values.into_iter().fold(0, i64::saturating_add)
}

/// Rounds half to even at `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Fills the derived fields of `record` from its raw fields.
pub fn derive_kpis(record: &mut ArticleRecord) {
    let units = record.weekly_units_sold;
    let stock = record.stock_primary;

    record.weekly_revenue = units as f64 * record.unit_sale_price;
    record.total_stock = stock.saturating_add(record.stock_secondary);
    record.rotation = if stock > 0 {
        round_to(units as f64 / stock as f64, 2)
    } else {
        0.0
    };
    record.coverage_days = if units > 0 {
        round_to(stock as f64 / units as f64 * 7.0, 1)
    } else {
        COVERAGE_SENTINEL
    };
    record.status = classify(record);
    record.sales_mix = sales_mix(record);
}

/// Ordered rules, first match wins.
pub fn classify(record: &ArticleRecord) -> Status {
    if record.weekly_units_sold == 0 && record.stock_primary > DEAD_STOCK_MIN_UNITS {
        Status::DeadStock
    } else if record.coverage_days < URGENT_COVERAGE_DAYS {
        Status::Urgent
    } else if record.coverage_days < ORDER_COVERAGE_DAYS {
        Status::ToOrder
    } else if record.rotation > BLOCKBUSTER_ROTATION {
        Status::Blockbuster
    } else {
        Status::Stable
    }
}

pub fn sales_mix(record: &ArticleRecord) -> SalesMix {
    let stock = record.stock_primary;
    match (record.is_selling(), stock) {
        (true, s) if s >= CRITICAL_STOCK_UNITS => SalesMix::Active,
        (true, s) if s > 0 => SalesMix::Critical,
        (true, _) => SalesMix::Stockout,
        (false, s) if s > 0 => SalesMix::Idle,
        (false, _) => SalesMix::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(stock: i64, units: i64, price: f64) -> ArticleRecord {
        let mut record = ArticleRecord::new("0000000000001");
        record.stock_primary = stock;
        record.weekly_units_sold = units;
        record.unit_sale_price = price;
        derive_kpis(&mut record);
        record
    }

    #[test]
    fn coverage_and_rotation_are_rounded() {
        let record = article(3, 5, 10.0);
        assert_eq!(record.coverage_days, 4.2);
        assert_eq!(record.rotation, 1.67);
        assert_eq!(record.weekly_revenue, 50.0);
    }

    #[test]
    fn sentinel_only_without_sales() {
        assert_eq!(article(4, 0, 1.0).coverage_days, COVERAGE_SENTINEL);
        assert_ne!(article(4, 1, 1.0).coverage_days, COVERAGE_SENTINEL);
    }

    #[test]
    fn dead_stock_pre_empts_everything() {
        assert_eq!(article(15, 0, 10.0).status, Status::DeadStock);
        assert_eq!(article(10, 0, 10.0).status, Status::Stable);
    }

    #[test]
    fn coverage_bands() {
        assert_eq!(article(10, 7, 1.0).status, Status::Urgent); // 10 days
        assert_eq!(article(14, 7, 1.0).status, Status::ToOrder); // 14 days
        assert_eq!(article(28, 7, 1.0).status, Status::Stable); // 28 days, rotation 0.25
        // rotation 0.6, but 11.7 days of cover is checked first
        assert_eq!(article(100, 60, 1.0).status, Status::Urgent);
    }

    #[test]
    fn classify_reads_the_record_predicates() {
        let mut record = ArticleRecord::new("0000000000001");
        record.weekly_units_sold = 3;
        record.stock_primary = 2;
        record.coverage_days = 30.0;
        record.rotation = 0.6;
        assert_eq!(classify(&record), Status::Blockbuster);
        record.rotation = 0.5;
        assert_eq!(classify(&record), Status::Stable);
    }

    #[test]
    fn sales_mix_categories() {
        assert_eq!(article(5, 1, 1.0).sales_mix, SalesMix::Active);
        assert_eq!(article(4, 1, 1.0).sales_mix, SalesMix::Critical);
        assert_eq!(article(0, 1, 1.0).sales_mix, SalesMix::Stockout);
        assert_eq!(article(3, 0, 1.0).sales_mix, SalesMix::Idle);
        assert_eq!(article(0, 0, 1.0).sales_mix, SalesMix::Absent);
    }

    #[test]
    fn half_values_round_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(2.5, 0), 2.0);
    }
}
