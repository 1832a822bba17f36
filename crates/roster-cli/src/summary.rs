use comfy_table::{Cell, Table};

use roster_model::RuleSet;
use roster_report::{apply_table_style, assignment_table, count_table, header_cell, month_count_table};

use crate::types::TallyResult;

pub fn print_summary(result: &TallyResult) {
    println!("Workbook: {}", result.workbook.display());

    for report in &result.days {
        println!();
        println!("Day {} ({})", report.day, report.sheets.join(", "));
        println!("{}", assignment_table(&report.first_seen));
        println!("{}", count_table(&report.counts));
    }

    println!();
    if result.month.first_seen.is_empty() {
        println!("No matching entries found.");
    } else {
        println!("Monthly summary");
        println!("{}", assignment_table(&result.month.first_seen));
        println!("{}", month_count_table(&result.month));
    }

    println!();
    println!(
        "Days reported: {} | Cells read: {} | Entries matched: {}",
        result.stats.days_reported, result.stats.cells_read, result.stats.entries_matched
    );
}

/// Prints the effective rule set as tables.
pub fn print_rules(rules: &RuleSet) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("From"), header_cell("To")]);
    apply_table_style(&mut table);
    for rule in &rules.substitutions {
        table.add_row(vec![Cell::new(&rule.from), Cell::new(&rule.to)]);
    }
    println!("Substitutions ({} rules, applied in order):", rules.substitutions.len());
    println!("{table}");

    println!();
    println!("Exclude keywords: {}", join_or_none(rules.exclude_keywords.iter()));

    println!();
    let mut table = Table::new();
    table.set_header(vec![header_cell("Patient"), header_cell("Fixed treatment")]);
    apply_table_style(&mut table);
    for (name, treatment) in &rules.overrides {
        table.add_row(vec![Cell::new(name), Cell::new(treatment)]);
    }
    println!("Overrides ({}):", rules.overrides.len());
    println!("{table}");

    println!();
    println!("Excluded names: {}", join_or_none(rules.excluded_names.iter()));
}

fn join_or_none<'a>(items: impl Iterator<Item = &'a String>) -> String {
    let joined: Vec<&str> = items.map(String::as_str).collect();
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined.join(", ")
    }
}
