//! Reporting week selection over the weekly sales extract.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};
use polars::prelude::DataFrame;
use rotation_ingest::column_strings;
use rotation_map::{Concept, column_names};
use rotation_model::{WeekOrigin, WeekSelection};
use tracing::{info, warn};

use crate::error::Result;
use crate::frame::keep_rows;

/// Day-first date layouts accepted in week-start cells.
///
/// Two-digit years are tried first: chrono's `%Y` also takes `24` as year 24.
const DATE_FORMATS: [&str; 8] = [
    "%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d",
];

/// Parsed years below this are layout mismatches, not real weeks.
const MIN_YEAR: i32 = 1900;

/// Plausible range of spreadsheet serial day numbers (1954..2119).
const SERIAL_RANGE: std::ops::RangeInclusive<u64> = 20_000..=80_000;

/// Parses a week-start cell, day first. Any time part is ignored.
///
/// Bare spreadsheet serial numbers are accepted too.
pub fn parse_week_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    let date_part = value.split([' ', 'T']).next().unwrap_or_default();
    if date_part.is_empty() {
        return None;
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .filter_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
        .find(|date| date.year() >= MIN_YEAR)
    {
        return Some(date);
    }
    let serial = date_part.split('.').next().unwrap_or_default();
    serial
        .parse::<u64>()
        .ok()
        .filter(|days| SERIAL_RANGE.contains(days))
        .and_then(|days| NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(days)))
}

/// Week-start column and its parsed dates.
///
/// Candidate columns are tried in detection order; the first one holding a
/// parseable date wins. Without any, the first candidate is returned.
fn parsed_week_column(sales: &DataFrame) -> Option<(String, Vec<Option<NaiveDate>>)> {
    let mut remaining = column_names(sales);
    let mut first = None;
    while let Some(column) = Concept::WeekStart.detect(&remaining) {
        remaining.retain(|name| *name != column);
        let Some(values) = column_strings(sales, &column) else {
            continue;
        };
        let parsed: Vec<Option<NaiveDate>> = values.iter().map(|value| parse_week_date(value)).collect();
        if parsed.iter().any(Option::is_some) {
            return Some((column, parsed));
        }
        first.get_or_insert((column, parsed));
    }
    first
}

/// Distinct week starts present in `sales`, latest first.
pub fn available_weeks(sales: &DataFrame) -> Vec<NaiveDate> {
    let Some((_, parsed)) = parsed_week_column(sales) else {
        return Vec::new();
    };
    let distinct: BTreeSet<NaiveDate> = parsed.into_iter().flatten().collect();
    distinct.into_iter().rev().collect()
}

/// The chosen week and the sales rows that belong to it.
#[derive(Debug, Clone)]
pub struct WeekSlice {
    pub week: WeekSelection,
    pub rows: DataFrame,
    /// Operator-facing notes about fallbacks taken.
    pub warnings: Vec<String>,
}

/// Chooses the reporting week and filters `sales` to it.
///
/// A requested date present in the data wins; otherwise the latest parsed
/// date is used and a warning is recorded. Without any parseable date the
/// run date `today` is reported and no sales rows are kept.
pub fn select_week(sales: &DataFrame, requested: Option<NaiveDate>, today: NaiveDate) -> Result<WeekSlice> {
    let mut warnings = Vec::new();
    let parsed = parsed_week_column(sales);
    let latest = parsed
        .as_ref()
        .and_then(|(_, dates)| dates.iter().flatten().max().copied());

    let Some((column, dates)) = parsed.filter(|_| latest.is_some()) else {
        let message = if sales.height() == 0 {
            "no weekly sales rows; every article reports zero sales".to_string()
        } else {
            "no parseable week start in sales; every article reports zero sales".to_string()
        };
        warn!(today = %today, "{message}");
        warnings.push(message);
        return Ok(WeekSlice {
            week: WeekSelection::new(today, WeekOrigin::Today),
            rows: DataFrame::empty(),
            warnings,
        });
    };
    let latest = latest.unwrap_or(today);

    let week = match requested {
        Some(date) if dates.contains(&Some(date)) => WeekSelection::new(date, WeekOrigin::Requested),
        Some(date) => {
            let message = format!(
                "requested week {} not found in sales; using latest week {}",
                date.format("%d/%m/%Y"),
                latest.format("%d/%m/%Y")
            );
            warn!("{message}");
            warnings.push(message);
            WeekSelection::new(latest, WeekOrigin::Latest)
        }
        None => WeekSelection::new(latest, WeekOrigin::Latest),
    };

    let keep: Vec<bool> = dates.iter().map(|date| *date == Some(week.start)).collect();
    let rows = keep_rows(sales, &keep)?;
    info!(
        column = %column,
        week_start = %week.start,
        iso_week = week.iso_week(),
        rows = rows.height(),
        "week selected"
    );
    Ok(WeekSlice { week, rows, warnings })
}
