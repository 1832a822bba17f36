//! First-occurrence deduplication and treatment tallies.
//!
//! Matched entries arrive in cell read order. Within a scope (one day, or
//! the whole month) the first entry for a name fixes that name's treatment;
//! later entries for the same name never overwrite it. Treatment counts are
//! tallied under the scope's [`CountPolicy`].

use std::collections::BTreeSet;

use roster_model::{
    Assignment, CountPolicy, DayReport, MonthReport, ParsedEntry, RuleSet, TallyOptions,
    TreatmentCount,
};

/// First-wins map plus treatment tally for one scope.
#[derive(Debug, Default)]
struct ScopeTally {
    seen: BTreeSet<String>,
    first_seen: Vec<Assignment>,
    counts: Vec<TreatmentCount>,
}

impl ScopeTally {
    /// Records one matched entry under the given counting policy.
    fn record(&mut self, entry: &ParsedEntry, policy: CountPolicy) {
        let newly_seen = self.seen.insert(entry.name.clone());
        if newly_seen {
            self.first_seen
                .push(Assignment::new(&entry.name, &entry.treatment));
        }
        let counted = match policy {
            CountPolicy::FirstOccurrence => newly_seen,
            CountPolicy::EveryOccurrence => true,
        };
        if counted {
            self.bump(&entry.treatment);
        }
    }

    /// Increments a treatment's tally, keeping first-counted order.
    fn bump(&mut self, treatment: &str) {
        match self.counts.iter_mut().find(|row| row.treatment == treatment) {
            Some(row) => row.count += 1,
            None => self.counts.push(TreatmentCount {
                treatment: treatment.to_string(),
                count: 1,
            }),
        }
    }

    fn total(&self) -> usize {
        self.counts.iter().map(|row| row.count).sum()
    }
}

/// Aggregates matched entries into per-day reports and a monthly summary.
///
/// Days must be fed in read order; the month scope spans the concatenation
/// of all days, so first-occurrence dedup across the month follows the same
/// order the cells were read in.
#[derive(Debug)]
pub struct TallyAggregator<'a> {
    rules: &'a RuleSet,
    options: TallyOptions,
    month: ScopeTally,
}

impl<'a> TallyAggregator<'a> {
    pub fn new(rules: &'a RuleSet, options: TallyOptions) -> Self {
        Self {
            rules,
            options,
            month: ScopeTally::default(),
        }
    }

    /// Consumes one day's matched entries in read order.
    ///
    /// Entries for excluded names are skipped entirely and do not reach the
    /// month scope either. Returns `None` when no entry survives, so days
    /// without matches produce no report.
    pub fn add_day(
        &mut self,
        day: u8,
        sheets: Vec<String>,
        entries: &[ParsedEntry],
    ) -> Option<DayReport> {
        let mut scope = ScopeTally::default();
        for entry in entries {
            if self.rules.excluded_names.contains(&entry.name) {
                continue;
            }
            scope.record(entry, self.options.day_policy);
            self.month.record(entry, self.options.month_policy);
        }
        if scope.first_seen.is_empty() {
            return None;
        }
        Some(DayReport {
            day,
            sheets,
            first_seen: scope.first_seen,
            counts: scope.counts,
        })
    }

    /// Produces the monthly summary across all days fed so far.
    pub fn finish(self) -> MonthReport {
        let total = self.month.total();
        MonthReport {
            first_seen: self.month.first_seen,
            counts: self.month.counts,
            total,
        }
    }
}
