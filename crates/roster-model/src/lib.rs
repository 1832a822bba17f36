pub mod entry;
pub mod error;
pub mod options;
pub mod report;
pub mod rules;

pub use entry::{DaySheet, ParsedEntry};
pub use error::{Result, RosterError};
pub use options::{CountPolicy, NameMode, TallyOptions};
pub use report::{Assignment, DayReport, MonthReport, TreatmentCount};
pub use rules::{
    RuleSet, RulesConfig, Substitution, default_exclude_keywords, default_substitutions,
    load_rules_config, parse_keyword_list, parse_override_rules, parse_substitution_rules,
};
