use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use rotation_ingest::column_strings;
use rotation_map::Concept;
use tracing::debug;

use crate::error::Result;

/// Keeps the rows whose banner column equals `banner`.
///
/// Comparison trims and ignores case. Returns `None` when the frame has no
/// banner column at all.
pub fn filter_by_banner(df: &DataFrame, banner: &str) -> Result<Option<DataFrame>> {
    let columns = rotation_map::column_names(df);
    let Some(banner_column) = Concept::Banner.detect(&columns) else {
        return Ok(None);
    };
    let wanted = banner.trim();
    let mask: Vec<bool> = column_strings(df, &banner_column)
        .unwrap_or_default()
        .iter()
        .map(|value| value.trim().eq_ignore_ascii_case(wanted))
        .collect();
    let mask = BooleanChunked::from_slice("banner_mask".into(), &mask);
    let filtered = df.filter(&mask)?;
    debug!(
        column = %banner_column,
        banner = wanted,
        kept = filtered.height(),
        total = df.height(),
        "banner filter applied"
    );
    Ok(Some(filtered))
}

/// Keeps the rows whose mask entry is true.
pub fn keep_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    let mask = BooleanChunked::from_slice("row_mask".into(), keep);
    Ok(df.filter(&mask)?)
}
