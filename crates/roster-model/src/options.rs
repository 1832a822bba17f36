//! Configuration options for tally runs.

use serde::{Deserialize, Serialize};

/// How treatment counts are tallied within a scope (day or month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CountPolicy {
    /// Count one occurrence per newly seen name; the tally is derived
    /// from the first-seen map.
    #[default]
    FirstOccurrence,
    /// Count every matched, non-excluded entry regardless of dedup.
    EveryOccurrence,
}

/// How the captured name token is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NameMode {
    /// One name of 2-4 characters, no embedded spaces.
    #[default]
    Single,
    /// A 2-10 character token that may hold several whitespace-separated
    /// names; each emits its own entry sharing the cell's treatment.
    Split,
}

/// Options controlling parsing and aggregation behavior.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TallyOptions {
    /// Name token interpretation.
    pub name_mode: NameMode,
    /// Counting policy for per-day tallies.
    pub day_policy: CountPolicy,
    /// Counting policy for the monthly tally.
    pub month_policy: CountPolicy,
}

impl TallyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name_mode(mut self, mode: NameMode) -> Self {
        self.name_mode = mode;
        self
    }

    #[must_use]
    pub fn with_day_policy(mut self, policy: CountPolicy) -> Self {
        self.day_policy = policy;
        self
    }

    #[must_use]
    pub fn with_month_policy(mut self, policy: CountPolicy) -> Self {
        self.month_policy = policy;
        self
    }
}
