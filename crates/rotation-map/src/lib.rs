//! Schema normalization for heterogeneous retail extracts.
//!
//! Upstream systems name the same business field in many ways ("STOCK EP",
//! "StockEP", "Stoc k EP"). This crate canonicalizes column names, maps
//! them onto [`Concept`]s through an ordered alias table, and normalizes
//! product identifiers into the shared 13-character join key.

#![deny(unsafe_code)]

pub mod columns;
pub mod concept;
pub mod identifier;

pub use columns::{canonical_name, canonicalize_columns, column_names, detect_column, unique_names};
pub use concept::{ColumnResolution, Concept};
pub use identifier::normalize_identifier;
