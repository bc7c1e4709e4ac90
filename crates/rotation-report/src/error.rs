//! Error types for report writing.

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Errors that can occur while assembling or saving the workbook.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// Output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Workbook could not be saved.
    #[error("failed to save workbook {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// Sheet or cell write rejected by the workbook writer.
    #[error("workbook layout error: {0}")]
    Layout(#[from] XlsxError),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
