//! Terminal table rendering for tally reports.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_model::{Assignment, MonthReport, TreatmentCount};

/// Table of first-seen name → treatment rows for one scope.
pub fn assignment_table(rows: &[Assignment]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Patient"), header_cell("Treatment")]);
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(vec![Cell::new(&row.name), Cell::new(&row.treatment)]);
    }
    table
}

/// Table of treatment → count rows, without a total row.
pub fn count_table(rows: &[TreatmentCount]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Treatment"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![Cell::new(&row.treatment), Cell::new(row.count)]);
    }
    table
}

/// Monthly count table with a grand-total row.
pub fn month_count_table(report: &MonthReport) -> Table {
    let mut table = count_table(&report.counts);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.total).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Shared table style: condensed UTF8 borders with round corners.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

/// Bold cyan header cell.
pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_table_lists_rows_in_order() {
        let rows = vec![
            Assignment::new("김철수", "도수5"),
            Assignment::new("박영희", "도수8"),
        ];
        let rendered = assignment_table(&rows).to_string();
        let first = rendered.find("김철수").expect("first name");
        let second = rendered.find("박영희").expect("second name");
        assert!(first < second);
        assert!(rendered.contains("Patient"));
        assert!(rendered.contains("도수8"));
    }

    #[test]
    fn count_table_shows_counts() {
        let rows = vec![
            TreatmentCount {
                treatment: "도수9".to_string(),
                count: 3,
            },
            TreatmentCount {
                treatment: "NDT".to_string(),
                count: 1,
            },
        ];
        let rendered = count_table(&rows).to_string();
        assert!(rendered.contains("도수9"));
        assert!(rendered.contains('3'));
        assert!(rendered.contains("NDT"));
    }

    #[test]
    fn month_table_ends_with_grand_total() {
        let report = MonthReport {
            first_seen: vec![Assignment::new("김철수", "도수5")],
            counts: vec![TreatmentCount {
                treatment: "도수5".to_string(),
                count: 1,
            }],
            total: 1,
        };
        let rendered = month_count_table(&report).to_string();
        let treatment = rendered.find("도수5").expect("treatment row");
        let total = rendered.find("TOTAL").expect("total row");
        assert!(treatment < total);
    }
}
