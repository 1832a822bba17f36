use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use roster_cli::logging::redact_name;
use roster_core::run_tally;
use roster_ingest::ScheduleWorkbook;
use roster_model::{CountPolicy, NameMode, RuleSet, RulesConfig, TallyOptions, load_rules_config};

use crate::cli::{CountPolicyArg, RulesArgs, TallyArgs};
use crate::summary::print_rules;
use crate::types::TallyResult;

pub fn run_tally_command(args: &TallyArgs) -> Result<TallyResult> {
    let rules = build_rule_set(
        args.rules.as_deref(),
        args.no_default_rules,
        &args.exclude_names,
    )?;
    let options = TallyOptions::new()
        .with_name_mode(if args.split_names {
            NameMode::Split
        } else {
            NameMode::Single
        })
        .with_day_policy(count_policy(args.day_policy))
        .with_month_policy(count_policy(args.month_policy));

    let span = info_span!("tally", workbook = %args.workbook.display());
    let _guard = span.enter();
    let workbook = ScheduleWorkbook::open(&args.workbook)
        .with_context(|| format!("open workbook {}", args.workbook.display()))?;
    let days = workbook.day_sheets(&args.marker);
    // The marker is usually a staff name, so it follows the same redaction
    // rule as patient names.
    info!(
        marker = %redact_name(&args.marker),
        day_count = days.len(),
        "workbook loaded"
    );

    let outcome = run_tally(&days, &rules, options);
    Ok(TallyResult {
        workbook: args.workbook.clone(),
        days: outcome.days,
        month: outcome.month,
        stats: outcome.stats,
    })
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let rules = build_rule_set(args.rules.as_deref(), args.no_default_rules, &[])?;
    print_rules(&rules);
    Ok(())
}

/// Builds the effective rule set from the rules file and CLI flags.
fn build_rule_set(
    path: Option<&Path>,
    no_defaults: bool,
    extra_excluded: &[String],
) -> Result<RuleSet> {
    let mut config = match path {
        Some(path) => {
            load_rules_config(path).with_context(|| format!("load rules file {}", path.display()))?
        }
        None => RulesConfig::default(),
    };
    if no_defaults {
        config.use_defaults = false;
    }
    let mut rules = config.into_rule_set();
    rules.excluded_names.extend(extra_excluded.iter().cloned());
    Ok(rules)
}

fn count_policy(arg: CountPolicyArg) -> CountPolicy {
    match arg {
        CountPolicyArg::First => CountPolicy::FirstOccurrence,
        CountPolicyArg::Every => CountPolicy::EveryOccurrence,
    }
}
