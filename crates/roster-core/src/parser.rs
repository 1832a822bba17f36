//! Extraction of (name, treatment) pairs from raw schedule cells.

use std::sync::LazyLock;

use regex::Regex;

use roster_model::{NameMode, ParsedEntry, RuleSet};

use crate::normalize::{EQUIPMENT_ONLY_CODE, clean};

/// Token marking a lunch slot; rejects the whole cell wherever it appears.
const LUNCH_TOKEN: &str = "점심";

/// Placeholder for an empty slot.
const PLACEHOLDER_DASH: &str = "ㅡ";

/// Cell structure in single-name mode: an optional 3-5 digit chart-number
/// prefix, a 2-4 syllable name optionally wrapped in parentheses, at least
/// one space, and the treatment remainder.
static SINGLE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{3,5}\s*)?(\(?[가-힣]{2,4}\)?)\s+(.+)$").expect("invalid cell pattern")
});

/// Split-name variant: the name token is 2-10 characters and may hold
/// several whitespace-separated names.
static SPLIT_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{3,5}\s*)?(\(?[가-힣][가-힣 ]{1,9}\)?)\s+(.+)$")
        .expect("invalid cell pattern")
});

/// Parses raw cells into entries under a fixed rule set.
#[derive(Debug, Clone, Copy)]
pub struct EntryParser<'a> {
    rules: &'a RuleSet,
    mode: NameMode,
}

impl<'a> EntryParser<'a> {
    pub fn new(rules: &'a RuleSet, mode: NameMode) -> Self {
        Self { rules, mode }
    }

    /// Extracts the entries a cell yields, in name order for split cells.
    ///
    /// Returns an empty vector for non-matches: blank cells, lunch slots,
    /// the placeholder dash, cells that fail the structural pattern, and
    /// cells whose treatment cleans away to nothing. Single-name mode
    /// yields at most one entry.
    pub fn parse(&self, raw: &str) -> Vec<ParsedEntry> {
        let value = raw.trim();
        if value.is_empty() || value.contains(LUNCH_TOKEN) || value == PLACEHOLDER_DASH {
            return Vec::new();
        }
        let pattern = match self.mode {
            NameMode::Single => &SINGLE_NAME_PATTERN,
            NameMode::Split => &SPLIT_NAME_PATTERN,
        };
        let Some(caps) = pattern.captures(value) else {
            return Vec::new();
        };
        let name = caps[1].replace(['(', ')'], "");
        let remainder = caps[2].trim();
        match self.mode {
            NameMode::Single => self.parse_single(&name, remainder),
            NameMode::Split => self.parse_split(&name, remainder),
        }
    }

    fn parse_single(&self, name: &str, remainder: &str) -> Vec<ParsedEntry> {
        // An override wins outright; substitution and cleaning are skipped.
        if let Some(fixed) = self.rules.overrides.get(name) {
            return vec![ParsedEntry::new(name, fixed)];
        }
        match self.resolve_treatment(remainder) {
            Some(treatment) => vec![ParsedEntry::new(name, treatment)],
            None => Vec::new(),
        }
    }

    /// Emits one entry per name token. Overridden tokens get their fixed
    /// treatment; the remaining tokens share the cleaned remainder. When
    /// the remainder cleans to nothing only overridden tokens survive.
    fn parse_split(&self, name: &str, remainder: &str) -> Vec<ParsedEntry> {
        let shared = self.resolve_treatment(remainder);
        let mut entries = Vec::new();
        for token in name.split_whitespace() {
            if token.chars().count() < 2 || self.rules.excluded_names.contains(token) {
                continue;
            }
            if let Some(fixed) = self.rules.overrides.get(token) {
                entries.push(ParsedEntry::new(token, fixed));
            } else if let Some(treatment) = &shared {
                entries.push(ParsedEntry::new(token, treatment));
            }
        }
        entries
    }

    /// Substitutes and cleans a remainder; `None` means no treatment.
    fn resolve_treatment(&self, remainder: &str) -> Option<String> {
        let mut treatment = remainder.to_string();
        for rule in &self.rules.substitutions {
            treatment = treatment.replace(&rule.from, &rule.to);
        }
        let cleaned = clean(&treatment, &self.rules.exclude_keywords);
        if cleaned.is_empty() || cleaned == EQUIPMENT_ONLY_CODE {
            None
        } else {
            Some(cleaned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::RulesConfig;

    fn default_rules() -> RuleSet {
        RulesConfig::default().into_rule_set()
    }

    fn parse_one(rules: &RuleSet, raw: &str) -> Option<ParsedEntry> {
        EntryParser::new(rules, NameMode::Single).parse(raw).pop()
    }

    #[test]
    fn rejects_blank_lunch_and_dash() {
        let rules = default_rules();
        assert!(parse_one(&rules, "").is_none());
        assert!(parse_one(&rules, "   ").is_none());
        assert!(parse_one(&rules, "철수 점심").is_none());
        assert!(parse_one(&rules, "12시 점심시간").is_none());
        assert!(parse_one(&rules, "ㅡ").is_none());
    }

    #[test]
    fn rejects_cells_without_name_structure() {
        let rules = default_rules();
        assert!(parse_one(&rules, "도수5").is_none());
        assert!(parse_one(&rules, "123456 도수5").is_none());
        assert!(parse_one(&rules, "abc 도수5").is_none());
    }

    #[test]
    fn extracts_name_and_treatment() {
        let rules = default_rules();
        let entry = parse_one(&rules, "1234 김철수 도수5").expect("entry");
        assert_eq!(entry.name, "김철수");
        assert_eq!(entry.treatment, "도수5");
    }

    #[test]
    fn applies_substitutions_then_cleaning() {
        let rules = default_rules();
        let entry = parse_one(&rules, "철수 simple 치료먼저").expect("entry");
        assert_eq!(entry, ParsedEntry::new("철수", "도수9"));
    }

    #[test]
    fn discards_cell_that_cleans_to_nothing() {
        let rules = default_rules();
        assert!(parse_one(&rules, "1234 김철수 (도수5 평가) FES").is_none());
    }

    #[test]
    fn discards_equipment_only_cell() {
        // The equipment keyword is a default exclude, so drop it to leave
        // the bare equipment-only code after cleaning.
        let mut rules = default_rules();
        rules.exclude_keywords.clear();
        assert!(parse_one(&rules, "김철수 FES").is_none());
    }

    #[test]
    fn override_bypasses_substitution_and_cleaning() {
        let mut rules = default_rules();
        rules
            .overrides
            .insert("곽순욱".to_string(), "도수8".to_string());
        let entry = parse_one(&rules, "(곽순욱) 도수3 평가").expect("entry");
        assert_eq!(entry, ParsedEntry::new("곽순욱", "도수8"));
        // Even a remainder that would otherwise be rejected outright.
        let entry = parse_one(&rules, "곽순욱 FES").expect("entry");
        assert_eq!(entry.treatment, "도수8");
    }

    #[test]
    fn strips_wrapping_parens_from_name() {
        let rules = default_rules();
        let entry = parse_one(&rules, "(박영희) 도수5").expect("entry");
        assert_eq!(entry.name, "박영희");
    }

    #[test]
    fn split_mode_emits_entry_per_name() {
        let rules = default_rules();
        let parser = EntryParser::new(&rules, NameMode::Split);
        let entries = parser.parse("김철수 박영희 pain5");
        assert_eq!(
            entries,
            vec![
                ParsedEntry::new("김철수", "pain5"),
                ParsedEntry::new("박영희", "pain5"),
            ]
        );
    }

    #[test]
    fn split_mode_drops_excluded_names() {
        let mut rules = default_rules();
        rules.excluded_names.insert("김철수".to_string());
        let parser = EntryParser::new(&rules, NameMode::Split);
        let entries = parser.parse("김철수 박영희 pain5");
        assert_eq!(entries, vec![ParsedEntry::new("박영희", "pain5")]);
    }

    #[test]
    fn split_mode_overridden_token_keeps_fixed_treatment() {
        let mut rules = default_rules();
        rules
            .overrides
            .insert("곽순욱".to_string(), "도수8".to_string());
        let parser = EntryParser::new(&rules, NameMode::Split);
        let entries = parser.parse("곽순욱 박영희 pain5");
        assert_eq!(
            entries,
            vec![
                ParsedEntry::new("곽순욱", "도수8"),
                ParsedEntry::new("박영희", "pain5"),
            ]
        );
        // Remainder cleans to nothing: only the overridden token survives.
        let entries = parser.parse("곽순욱 박영희 FES");
        assert_eq!(entries, vec![ParsedEntry::new("곽순욱", "도수8")]);
    }
}
