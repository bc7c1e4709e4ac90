//! Rendering of the laid-out sheets into an `.xlsx` workbook.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::{debug, info};

use crate::decorate::{HeaderDecorator, SheetDecorator};
use crate::error::{ReportError, Result};
use crate::layout::{Cell, LISTING_SHEET, Region, ReportPayload, SheetLayout, layout_report};

const MIN_COLUMN_WIDTH: usize = 8;
const MAX_COLUMN_WIDTH: usize = 80;

/// `Suivi_<prefix>_W<week>_<ddmmYYYY_HHMM>.xlsx`
pub fn report_file_name(payload: &ReportPayload) -> String {
    format!(
        "Suivi_{}_W{:02}_{}.xlsx",
        payload.prefix,
        payload.week.iso_week(),
        payload.generated_at.format("%d%m%Y_%H%M")
    )
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    format: Option<&Format>,
) -> std::result::Result<(), XlsxError> {
    match (cell, format) {
        (Cell::Text(value), Some(format)) => {
            worksheet.write_string_with_format(row, col, value, format)?;
        }
        (Cell::Text(value), None) => {
            worksheet.write_string(row, col, value)?;
        }
        (Cell::Status(status), Some(format)) => {
            worksheet.write_string_with_format(row, col, status.label(), format)?;
        }
        (Cell::Status(status), None) => {
            worksheet.write_string(row, col, status.label())?;
        }
        (Cell::Integer(value), Some(format)) => {
            worksheet.write_number_with_format(row, col, *value as f64, format)?;
        }
        (Cell::Integer(value), None) => {
            worksheet.write_number(row, col, *value as f64)?;
        }
        (Cell::Number(value), Some(format)) => {
            worksheet.write_number_with_format(row, col, *value, format)?;
        }
        (Cell::Number(value), None) => {
            worksheet.write_number(row, col, *value)?;
        }
    }
    Ok(())
}

fn write_region(
    worksheet: &mut Worksheet,
    region: &Region,
    decorator: &dyn SheetDecorator,
) -> std::result::Result<(), XlsxError> {
    let header_format = decorator.header_format();
    for (col, header) in region.headers.iter().enumerate() {
        worksheet.write_string_with_format(region.origin_row, col as u16, header, &header_format)?;
    }
    for (offset, cells) in region.rows.iter().enumerate() {
        let row = region.origin_row + 1 + offset as u32;
        for (col, cell) in cells.iter().enumerate() {
            let column = region.headers.get(col).map(String::as_str).unwrap_or_default();
            let format = decorator.cell_format(column, cell);
            write_cell(worksheet, row, col as u16, cell, format.as_ref())?;
        }
    }
    Ok(())
}

/// Widest rendered value per column across all regions of a sheet.
fn column_widths(sheet: &SheetLayout) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    let mut widen = |col: usize, len: usize| {
        if widths.len() <= col {
            widths.resize(col + 1, 0);
        }
        widths[col] = widths[col].max(len);
    };
    for region in &sheet.regions {
        for (col, header) in region.headers.iter().enumerate() {
            widen(col, header.chars().count());
        }
        for cells in &region.rows {
            for (col, cell) in cells.iter().enumerate() {
                widen(col, cell.display().chars().count());
            }
        }
    }
    widths
        .into_iter()
        .map(|w| (w + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH))
        .collect()
}

/// Builds the workbook with a custom decorator.
pub fn build_report_with(
    payload: &ReportPayload,
    decorator: &dyn SheetDecorator,
) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    for sheet in layout_report(payload) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;
        for region in &sheet.regions {
            write_region(worksheet, region, decorator)?;
        }
        for (col, width) in column_widths(&sheet).into_iter().enumerate() {
            worksheet.set_column_width(col as u16, width as f64)?;
        }
        if sheet.name == LISTING_SHEET {
            worksheet.set_freeze_panes(1, 0)?;
        }
        debug!(sheet = %sheet.name, regions = sheet.regions.len(), "sheet laid out");
    }
    Ok(workbook)
}

/// Builds the workbook in the default house style.
pub fn build_report(payload: &ReportPayload) -> Result<Workbook> {
    build_report_with(payload, &HeaderDecorator)
}

/// Writes the report into `output_dir`, creating it when missing.
///
/// Returns the path of the written file.
pub fn write_report(payload: &ReportPayload, output_dir: &Path) -> Result<PathBuf> {
    let start = Instant::now();
    std::fs::create_dir_all(output_dir).map_err(|source| ReportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let path = output_dir.join(report_file_name(payload));
    let mut workbook = build_report(payload)?;
    workbook.save(&path).map_err(|source| ReportError::Save {
        path: path.clone(),
        source,
    })?;
    info!(
        path = %path.display(),
        articles = payload.records.len(),
        duration_ms = start.elapsed().as_millis(),
        "report written"
    );
    Ok(path)
}
