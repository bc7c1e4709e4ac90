//! Error types for the reconciliation engine.

use thiserror::Error;

/// Errors that stop a reconciliation run.
///
/// Everything else the engine meets (missing columns, unparseable cells,
/// unknown weeks) is absorbed with a default value and a warning.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Neither the recap nor the stock fallback yielded a single article.
    #[error("no catalogue data: recap is unusable and stock has no rows for banner '{banner}'")]
    NoCatalogData { banner: String },

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Frame(#[from] polars::error::PolarsError),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, CoreError>;
