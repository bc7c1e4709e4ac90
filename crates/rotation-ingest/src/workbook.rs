//! Tabular source adapter: workbook and CSV extracts as string frames.
//!
//! [`load_table`] never fails. Any open, parse or sheet error is logged and
//! an empty frame is returned so each caller can apply its own fallback.
//! [`try_load_table`] exposes the underlying error.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use polars::prelude::DataFrame;
use rotation_map::{Concept, canonical_name, unique_names};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::polars_utils::{format_numeric, string_frame};

/// Minimum data rows a header candidate must yield to be accepted.
pub const MIN_RECAP_ROWS: usize = 5;

/// Which sheet of a workbook to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    /// Named sheet; missing is an error.
    Name(String),
    /// Zero-based sheet position.
    Index(usize),
    /// Named sheet, or the first sheet when the name is absent.
    NameOrFirst(String),
}

impl SheetSelector {
    pub fn first() -> Self {
        SheetSelector::Index(0)
    }
}

/// Loads one table, returning an empty frame on any failure.
/// Without `header_rows` sheet row 0 is the header. With candidates,
/// Without `header_rows` the first non-blank row is the header. With candidates,
/// each row index is tried in ascending order and the first table that has
/// an identifier column and more than [`MIN_RECAP_ROWS`] rows is kept.
pub fn load_table(path: &Path, sheet: &SheetSelector, header_rows: Option<&[usize]>) -> DataFrame {
    match try_load_table(path, sheet, header_rows) {
        Ok(df) => df,
        Err(error) => {
            warn!(file = %path.display(), %error, "table unreadable; treating as empty");
            DataFrame::empty()
        }
    }
}

/// Fallible variant of [`load_table`].
pub fn try_load_table(
    path: &Path,
    sheet: &SheetSelector,
    header_rows: Option<&[usize]>,
) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let grid = if is_csv(path) {
        read_csv_grid(path)?
    } else {
        read_workbook_grid(path, sheet)?
    };
    if grid.is_empty() {
        return Err(IngestError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    let Some(candidates) = header_rows else {
        let df = frame_from_grid(&grid, 0)?;
        info!(file = %path.display(), rows = df.height(), columns = df.width(), "table loaded");
        return Ok(df);
    };

    let mut sorted = candidates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    for header_row in sorted {
        if header_row >= grid.len() {
            break;
        }
        let df = frame_from_grid(&grid, header_row)?;
        let canonical: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| canonical_name(name.as_str()))
            .collect();
        let has_identifier = Concept::Identifier.detect(&canonical).is_some();
        if has_identifier && df.height() > MIN_RECAP_ROWS {
            info!(
                file = %path.display(),
                header_row,
                rows = df.height(),
                "header row accepted"
            );
            return Ok(df);
        }
        debug!(
            file = %path.display(),
            header_row,
            has_identifier,
            rows = df.height(),
            "header row rejected"
        );
    }
    Err(IngestError::NoHeaderDetected {
        path: path.to_path_buf(),
    })
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Builds a frame using `header_row` as header and every later non-blank row as data.
fn frame_from_grid(grid: &[Vec<String>], header_row: usize) -> Result<DataFrame> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    let header = grid.get(header_row).cloned().unwrap_or_default();
    let headers = unique_names((0..width).map(|idx| header.get(idx).cloned().unwrap_or_default()));
    let rows: Vec<Vec<String>> = grid
        .iter()
        .skip(header_row + 1)
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .cloned()
        .collect();
    string_frame(&headers, &rows).map_err(|e| IngestError::DataFrame {
        message: e.to_string(),
    })
}

fn read_workbook_grid(path: &Path, sheet: &SheetSelector) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::WorkbookOpen {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let names = workbook.sheet_names();
    let sheet_name = match sheet {
        SheetSelector::Name(name) => names
            .iter()
            .find(|candidate| candidate.trim().eq_ignore_ascii_case(name.trim()))
            .cloned(),
        SheetSelector::Index(idx) => names.get(*idx).cloned(),
        SheetSelector::NameOrFirst(name) => names
            .iter()
            .find(|candidate| candidate.trim().eq_ignore_ascii_case(name.trim()))
            .cloned()
            .or_else(|| {
                let first = names.first().cloned();
                if let Some(first) = &first {
                    warn!(file = %path.display(), wanted = %name, used = %first, "sheet missing; using first sheet");
                }
                first
            }),
    };
    let Some(sheet_name) = sheet_name else {
        return Err(IngestError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: match sheet {
                SheetSelector::Name(name) | SheetSelector::NameOrFirst(name) => name.clone(),
                SheetSelector::Index(idx) => format!("#{idx}"),
            },
        });
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::WorkbookOpen {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(range_to_grid(&range))
}

/// Lays the used range out on absolute sheet rows so header indices match
/// what an operator sees in the spreadsheet.
fn range_to_grid(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let mut grid: Vec<Vec<String>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(cell_to_string));
        grid.push(cells);
    }
    grid
}

/// Stringifies one cell: whole floats without `.0`, dates as ISO.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_numeric(*f),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if value.time() == chrono::NaiveTime::MIN => {
                value.format("%Y-%m-%d").to_string()
            }
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format_numeric(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    }
}

/// Field delimiter guessed from the first line.
fn sniff_delimiter(path: &Path) -> Result<u8> {
    let file = File::open(path).map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let mut first = String::new();
    BufReader::new(file)
        .read_line(&mut first)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let semicolons = first.matches(';').count();
    let commas = first.matches(',').count();
    Ok(if semicolons > commas { b';' } else { b',' })
}

/// Reads a CSV export into a grid. The sheet selector does not apply.
pub fn read_csv_grid(path: &Path) -> Result<Vec<Vec<String>>> {
    let delimiter = sniff_delimiter(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        grid.push(
            record
                .iter()
                .map(|field| field.trim().trim_start_matches('\u{feff}').to_string())
                .collect(),
        );
    }
    Ok(grid)
}
