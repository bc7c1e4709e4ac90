//! Column name canonicalization and fuzzy column detection.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tracing::warn;

/// Canonical form of a column name: trimmed and upper-cased.
pub fn canonical_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Makes every name unique and non-empty, preserving order.
///
/// Blank names become `COL_<n>` (1-based position), repeated names get a
/// `_<k>` suffix starting at 2.
pub fn unique_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for (idx, raw) in names.into_iter().enumerate() {
        let trimmed = raw.as_ref().trim();
        let base = if trimmed.is_empty() {
            format!("COL_{}", idx + 1)
        } else {
            trimmed.to_string()
        };
        let mut candidate = base.clone();
        let mut suffix = 2;
        while seen.contains(&candidate) {
            candidate = format!("{base}_{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

/// Returns a copy of `df` whose column names are trimmed and upper-cased.
///
/// Row order and values are untouched. Names that collide after
/// canonicalization are suffixed so the frame stays valid.
pub fn canonicalize_columns(df: &DataFrame) -> DataFrame {
    let names = unique_names(
        df.get_column_names()
            .into_iter()
            .map(|name| canonical_name(name.as_str())),
    );
    let mut out = df.clone();
    if let Err(error) = out.set_column_names(names) {
        warn!(%error, "column canonicalization failed; keeping raw names");
        return df.clone();
    }
    out
}

/// Column names of a frame as owned strings, in frame order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Finds the column matching the first pattern group that matches anything.
///
/// Groups are tried in order; within the winning group the first column (in
/// `columns` order) whose canonical name contains any of the group's
/// substrings is returned. Matching is case-insensitive.
pub fn detect_column<S: AsRef<str>>(columns: &[S], groups: &[&[&str]]) -> Option<String> {
    let canonical: Vec<String> = columns.iter().map(|c| canonical_name(c.as_ref())).collect();
    for group in groups {
        let patterns: Vec<String> = group.iter().map(|p| canonical_name(p)).collect();
        for (idx, name) in canonical.iter().enumerate() {
            if patterns.iter().any(|pattern| name.contains(pattern.as_str())) {
                return Some(columns[idx].as_ref().to_string());
            }
        }
    }
    None
}
