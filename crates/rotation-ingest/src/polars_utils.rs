//! Polars helpers for string-typed extract tables.
//!
//! Every loaded table stores its cells as strings; these helpers build such
//! frames and read them back as text or numbers.

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null, properly formats numeric types.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "TRUE" } else { "FALSE" }.to_string(),
        other => other.to_string(),
    }
}

/// Formats a float without a trailing `.0` for whole values.
pub fn format_numeric(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 {
        format!("{v:.0}")
    } else {
        v.to_string()
    }
}

/// Parses a numeric cell, tolerating spaces and either decimal mark.
///
/// With both `,` and `.` present the last one is the decimal mark. A lone
/// comma is decimal; repeated marks of one kind group thousands. Returns
/// None for blank, non-numeric or non-finite input.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}' && *c != '\u{202f}')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let commas = cleaned.matches(',').count();
    let dots = cleaned.matches('.').count();
    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) if commas == 1 => cleaned.replace(',', "."),
        (Some(_), None) => cleaned.replace(',', ""),
        (None, Some(_)) if dots > 1 => cleaned.replace('.', ""),
        _ => cleaned,
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a quantity cell: truncated toward zero, negatives and blanks are 0.
pub fn parse_quantity(value: &str) -> i64 {
    parse_number(value)
        .map(|v| v.trunc().max(0.0) as i64)
        .unwrap_or(0)
}

/// Parses a price cell: negatives and blanks are 0.
pub fn parse_amount(value: &str) -> f64 {
    parse_number(value).map(|v| v.max(0.0)).unwrap_or(0.0)
}

/// Builds a frame of string columns. Short rows are padded with "".
pub fn string_frame(headers: &[String], rows: &[Vec<String>]) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values: Vec<String> = rows
                .iter()
                .map(|row| row.get(idx).cloned().unwrap_or_default())
                .collect();
            Series::new(name.as_str().into(), values).into_column()
        })
        .collect();
    DataFrame::new(columns)
}

/// Returns every value of `name` as text; a missing column yields None.
pub fn column_strings(df: &DataFrame, name: &str) -> Option<Vec<String>> {
    let column = df.column(name).ok()?;
    let values = match column.str() {
        Ok(chunked) => chunked
            .into_iter()
            .map(|value| value.unwrap_or_default().to_string())
            .collect(),
        Err(_) => (0..column.len())
            .map(|idx| column.get(idx).map(any_to_string).unwrap_or_default())
            .collect(),
    };
    Some(values)
}
