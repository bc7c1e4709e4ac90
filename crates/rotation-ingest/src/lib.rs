pub mod discovery;
pub mod error;
pub mod polars_utils;
pub mod workbook;

pub use discovery::{SourceFiles, is_artifact, list_matching_files, select_latest, select_sources};
pub use error::{IngestError, Result};
pub use polars_utils::{
    any_to_string, column_strings, format_numeric, parse_amount,
    parse_number, parse_quantity, string_frame,
};
pub use workbook::{
    MIN_RECAP_ROWS, SheetSelector, cell_to_string, load_table, read_csv_grid, try_load_table,
};
