//! Rule sets driving entry extraction.
//!
//! A [`RuleSet`] holds the ordered substitution rules, exclude keywords,
//! per-patient overrides, and excluded names for one run. It is built once
//! from configuration text and never mutated while the pipeline runs.
//!
//! Rule text formats match the operator-facing configuration surface:
//! substitutions and overrides are one `source => destination` line each,
//! exclude keywords are a comma-separated list. Malformed lines are
//! skipped, never an error.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Separator between the two sides of a rule line.
const RULE_SEPARATOR: &str = "=>";

/// One ordered text replacement applied to the treatment remainder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub from: String,
    pub to: String,
}

impl Substitution {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Immutable rule state for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    /// Applied in order; later rules see the result of earlier ones, and
    /// duplicate sources compound.
    pub substitutions: Vec<Substitution>,
    /// Literal substrings deleted from treatment text, in this order.
    pub exclude_keywords: Vec<String>,
    /// Patient name to fixed treatment; bypasses substitution and cleaning.
    pub overrides: BTreeMap<String, String>,
    /// Names dropped entirely from output.
    pub excluded_names: BTreeSet<String>,
}

/// Built-in substitution rules shipped with the tool.
pub fn default_substitutions() -> Vec<Substitution> {
    vec![
        Substitution::new("simple", "도수9"),
        Substitution::new("도수7", "도수8"),
        Substitution::new("16 1/2", "도수8"),
        Substitution::new("도수9*", "도수9"),
    ]
}

/// Built-in exclude keywords shipped with the tool.
pub fn default_exclude_keywords() -> Vec<String> {
    ["FES", "기구", "예약", "예약문자"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Parses substitution rule text, one `source => destination` per line.
///
/// Lines without exactly one separator are skipped, as are rules with an
/// empty source (they can never match). All surviving rules are kept in
/// listed order; duplicates are not collapsed.
pub fn parse_substitution_rules(text: &str) -> Vec<Substitution> {
    text.lines()
        .filter_map(split_rule_line)
        .filter(|(from, _)| !from.is_empty())
        .map(|(from, to)| Substitution::new(from, to))
        .collect()
}

/// Parses a comma-separated keyword list, dropping blank items.
pub fn parse_keyword_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|kw| !kw.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses override rule text, one `name => treatment` per line.
///
/// The last occurrence of a name wins. Rules with an empty name or empty
/// treatment are skipped: an override must always yield a usable entry.
pub fn parse_override_rules(text: &str) -> BTreeMap<String, String> {
    let mut overrides = BTreeMap::new();
    for (name, treatment) in text.lines().filter_map(split_rule_line) {
        if name.is_empty() || treatment.is_empty() {
            continue;
        }
        overrides.insert(name.to_string(), treatment.to_string());
    }
    overrides
}

/// Splits one rule line on `=>`, trimming both sides.
///
/// Returns `None` for lines without the separator or with more than one,
/// matching the "skip malformed lines silently" contract.
fn split_rule_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(RULE_SEPARATOR);
    let from = parts.next()?;
    let to = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((from.trim(), to.trim()))
}

/// Operator-facing rule configuration, usually loaded from a JSON file.
///
/// All fields are optional in the file; rule text uses the same line
/// formats the parse functions above accept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Substitution rules, one `source => destination` per line.
    pub substitutions: String,
    /// Comma-separated exclude keywords.
    pub exclude_keywords: String,
    /// Override rules, one `name => treatment` per line.
    pub patient_overrides: String,
    /// Names dropped entirely from output.
    pub excluded_names: Vec<String>,
    /// Prepend the built-in substitutions and keywords.
    pub use_defaults: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            substitutions: String::new(),
            exclude_keywords: String::new(),
            patient_overrides: String::new(),
            excluded_names: Vec::new(),
            use_defaults: true,
        }
    }
}

impl RulesConfig {
    /// Builds the effective [`RuleSet`].
    ///
    /// User substitutions and keywords are appended after the built-in
    /// defaults, so user rules see text already rewritten by the defaults.
    pub fn into_rule_set(self) -> RuleSet {
        let mut substitutions = if self.use_defaults {
            default_substitutions()
        } else {
            Vec::new()
        };
        substitutions.extend(parse_substitution_rules(&self.substitutions));

        let mut exclude_keywords = if self.use_defaults {
            default_exclude_keywords()
        } else {
            Vec::new()
        };
        exclude_keywords.extend(parse_keyword_list(&self.exclude_keywords));

        RuleSet {
            substitutions,
            exclude_keywords,
            overrides: parse_override_rules(&self.patient_overrides),
            excluded_names: self.excluded_names.into_iter().collect(),
        }
    }
}

/// Loads a [`RulesConfig`] from a JSON file.
///
/// # Errors
///
/// Returns an error when the file cannot be read or is not valid JSON.
pub fn load_rules_config(path: &Path) -> Result<RulesConfig> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| RosterError::RulesFile {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_rules_skip_malformed_lines() {
        let text = "도수7 => tweak\nno separator\na => b => c\n => empty source\nx=>y";
        let rules = parse_substitution_rules(text);
        assert_eq!(
            rules,
            vec![
                Substitution::new("도수7", "tweak"),
                Substitution::new("x", "y"),
            ]
        );
    }

    #[test]
    fn substitution_rules_keep_duplicates_in_order() {
        let rules = parse_substitution_rules("a => b\na => c");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].to, "b");
        assert_eq!(rules[1].to, "c");
    }

    #[test]
    fn keyword_list_trims_and_drops_blanks() {
        assert_eq!(
            parse_keyword_list("FES, 기구 ,,예약"),
            vec!["FES", "기구", "예약"]
        );
    }

    #[test]
    fn override_rules_last_wins() {
        let overrides = parse_override_rules("곽순욱 => 도수8\n곽순욱 => 도수9\n이름 => ");
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides["곽순욱"], "도수9");
    }

    #[test]
    fn config_appends_user_rules_after_defaults() {
        let config = RulesConfig {
            substitutions: "pain5 => pain9".to_string(),
            exclude_keywords: "안내".to_string(),
            ..RulesConfig::default()
        };
        let rules = config.into_rule_set();
        assert_eq!(rules.substitutions.len(), default_substitutions().len() + 1);
        assert_eq!(rules.substitutions.last().unwrap().from, "pain5");
        assert_eq!(rules.exclude_keywords.first().unwrap(), "FES");
        assert_eq!(rules.exclude_keywords.last().unwrap(), "안내");
    }

    #[test]
    fn config_without_defaults_is_user_rules_only() {
        let config = RulesConfig {
            substitutions: "a => b".to_string(),
            use_defaults: false,
            ..RulesConfig::default()
        };
        let rules = config.into_rule_set();
        assert_eq!(rules.substitutions, vec![Substitution::new("a", "b")]);
        assert!(rules.exclude_keywords.is_empty());
    }
}
