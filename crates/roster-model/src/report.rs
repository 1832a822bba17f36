//! Aggregated output tables.

use serde::{Deserialize, Serialize};

/// One first-seen row: a patient name and the treatment recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: String,
    pub treatment: String,
}

impl Assignment {
    pub fn new(name: impl Into<String>, treatment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            treatment: treatment.into(),
        }
    }
}

/// One tally row: a treatment code and how often it was counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentCount {
    pub treatment: String,
    pub count: usize,
}

/// Report for one day with at least one surviving entry.
///
/// `first_seen` is in insertion order: once a name appears it keeps the
/// treatment from its earliest matched entry that day. `counts` is in
/// first-counted order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayReport {
    pub day: u8,
    /// Workbook sheets that contributed the day's cells.
    pub sheets: Vec<String>,
    pub first_seen: Vec<Assignment>,
    pub counts: Vec<TreatmentCount>,
}

/// Monthly summary across all days, in read order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthReport {
    pub first_seen: Vec<Assignment>,
    pub counts: Vec<TreatmentCount>,
    /// Sum of all counts.
    pub total: usize,
}
