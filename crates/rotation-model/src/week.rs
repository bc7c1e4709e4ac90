use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// How the reporting week was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekOrigin {
    /// The operator asked for this week and it exists in the sales data.
    Requested,
    /// Latest week start found in the sales data.
    Latest,
    /// No parseable week start at all; the run date is used.
    Today,
}

/// The calendar week the report covers, identified by its start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSelection {
    pub start: NaiveDate,
    pub origin: WeekOrigin,
}

impl WeekSelection {
    pub fn new(start: NaiveDate, origin: WeekOrigin) -> Self {
        Self { start, origin }
    }

    /// ISO 8601 week number of the start date.
    pub fn iso_week(&self) -> u32 {
        self.start.iso_week().week()
    }

    /// Start date as `dd/mm/yyyy`, the format operators type at the prompt.
    pub fn display_date(&self) -> String {
        self.start.format("%d/%m/%Y").to_string()
    }
}
