//! Command-line front end of the weekly rotation dashboard.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod prompt;
pub mod summary;
