use std::path::PathBuf;

use roster_core::RunStats;
use roster_model::{DayReport, MonthReport};

/// Result of a full tally run, ready for summary printing.
#[derive(Debug)]
pub struct TallyResult {
    pub workbook: PathBuf,
    pub days: Vec<DayReport>,
    pub month: MonthReport,
    pub stats: RunStats,
}
