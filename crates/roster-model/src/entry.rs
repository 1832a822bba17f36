//! Parsed schedule entries and raw per-day cell batches.

use serde::{Deserialize, Serialize};

/// One extracted (patient name, treatment code) pair.
///
/// Both fields are non-empty; a cell that cannot produce both is a
/// non-match and never becomes a `ParsedEntry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub name: String,
    pub treatment: String,
}

impl ParsedEntry {
    pub fn new(name: impl Into<String>, treatment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            treatment: treatment.into(),
        }
    }
}

/// Raw cell values collected for one logical day.
///
/// Produced by the ingest layer; `cells` preserves top-to-bottom read
/// order across all sheets claimed by the day.
#[derive(Debug, Clone, Default)]
pub struct DaySheet {
    /// Day of month, 1-31.
    pub day: u8,
    /// Names of the workbook sheets that contributed cells.
    pub sheets: Vec<String>,
    /// Non-blank cell values in read order.
    pub cells: Vec<String>,
}
