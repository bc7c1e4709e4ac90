//! Dashboard workbook assembly.
//!
//! The report is laid out as plain tabular regions ([`layout_report`]) and
//! then rendered through a [`SheetDecorator`]:
//!
//! - **DASHBOARD**: KPI table, top sellers, recommendations, formula glossary
//! - **SUIVI**: every article, best revenue first
//! - **TOP CA**: top sellers by revenue
//! - **TOP MARQUES**: brand rollup, when any brand is present

mod decorate;
mod error;
mod layout;
mod writer;

pub use decorate::{HEADER_FILL, HeaderDecorator, SheetDecorator};
pub use error::{ReportError, Result};
pub use layout::{
    BRAND_SHEET, Cell, DASHBOARD_SHEET, DASHBOARD_TOP_ROW, LISTING_SHEET, Region, ReportPayload,
    SheetLayout, TOP_SHEET, layout_report,
};
pub use writer::{build_report, build_report_with, report_file_name, write_report};
