//! Batch tally pipeline over per-day cell batches.
//!
//! One run walks the day batches in order: each cell goes through the
//! entry parser, surviving entries feed the aggregator, and the run ends
//! with per-day reports plus the monthly summary.

use tracing::{debug, info};

use roster_model::{DayReport, DaySheet, MonthReport, RuleSet, TallyOptions};

use crate::aggregate::TallyAggregator;
use crate::parser::EntryParser;

/// Counters describing one tally run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    /// Non-blank cells read across all days.
    pub cells_read: usize,
    /// Entries that survived parsing, before name exclusion.
    pub entries_matched: usize,
    /// Days that produced at least one surviving entry.
    pub days_reported: usize,
}

/// Everything one run produces.
#[derive(Debug, Default)]
pub struct TallyOutcome {
    pub days: Vec<DayReport>,
    pub month: MonthReport,
    pub stats: RunStats,
}

/// Runs the full extraction and aggregation pipeline over day batches.
///
/// Days are consumed in the order supplied; cells within a day keep their
/// read order, which fixes which entry wins first-occurrence dedup. Cells
/// that fail to parse are expected noise and are dropped without comment.
pub fn run_tally(days: &[DaySheet], rules: &RuleSet, options: TallyOptions) -> TallyOutcome {
    let parser = EntryParser::new(rules, options.name_mode);
    let mut aggregator = TallyAggregator::new(rules, options);
    let mut stats = RunStats::default();
    let mut reports = Vec::new();
    for day in days {
        let mut entries = Vec::new();
        for cell in &day.cells {
            stats.cells_read += 1;
            entries.extend(parser.parse(cell));
        }
        stats.entries_matched += entries.len();
        debug!(
            day = day.day,
            cells = day.cells.len(),
            matched = entries.len(),
            "day parsed"
        );
        match aggregator.add_day(day.day, day.sheets.clone(), &entries) {
            Some(report) => {
                stats.days_reported += 1;
                reports.push(report);
            }
            None => debug!(day = day.day, "no surviving entries"),
        }
    }
    let month = aggregator.finish();
    info!(
        days = stats.days_reported,
        cells = stats.cells_read,
        matched = stats.entries_matched,
        month_total = month.total,
        "tally complete"
    );
    TallyOutcome {
        days: reports,
        month,
        stats,
    }
}
