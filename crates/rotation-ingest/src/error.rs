//! Error types for source discovery and table loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or reading extracts.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Glob pattern could not be compiled.
    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // === Workbook Errors ===
    /// Workbook could not be opened or parsed.
    #[error("failed to open workbook {path}: {message}")]
    WorkbookOpen { path: PathBuf, message: String },

    /// Requested sheet does not exist.
    #[error("sheet '{sheet}' not found in {path}")]
    SheetNotFound { path: PathBuf, sheet: String },

    /// Sheet or file holds no cells.
    #[error("no data in {path}")]
    EmptySource { path: PathBuf },

    /// No candidate header row produced a usable table.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    // === CSV Errors ===
    /// CSV file could not be parsed.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
