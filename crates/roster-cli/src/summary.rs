use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use roster_cli::pipeline::ValidationRun;
use roster_model::{EntityKind, Issue, Severity};
use roster_validate::GatingDecision;

pub fn print_summary(run: &ValidationRun, decision: &GatingDecision) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Source"),
        header_cell("Rows"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Info"),
    ]);
    apply_table_style(&mut table);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_rows = 0usize;
    for kind in EntityKind::ALL {
        let issues = run.report.issues_for(kind);
        let Some(dataset) = run.datasets.get(kind) else {
            table.add_row(vec![
                file_cell(kind),
                dim_cell("not supplied"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]);
            continue;
        };
        total_rows += dataset.len();
        table.add_row(vec![
            file_cell(kind),
            Cell::new(dataset.source()),
            Cell::new(dataset.len()),
            count_cell(count_severity(issues, Severity::Error), Color::Red),
            count_cell(count_severity(issues, Severity::Warning), Color::Yellow),
            count_cell(count_severity(issues, Severity::Info), Color::Blue),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        count_cell(run.report.error_count(), Color::Red).add_attribute(Attribute::Bold),
        count_cell(run.report.warning_count(), Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(run.report.info_count(), Color::Blue).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_issue_table(run.report.issues());
    print_gate(decision);
}

fn print_issue_table(issues: &[Issue]) {
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Row"),
        header_cell("Severity"),
        header_cell("Rule"),
        header_cell("Column"),
        header_cell("Value"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            file_cell(issue.file()),
            issue.row().map_or_else(|| dim_cell("-"), Cell::new),
            severity_cell(issue.severity()),
            Cell::new(issue.rule_code()),
            optional_cell(issue.column()),
            optional_cell(issue.value()),
            Cell::new(issue.message()),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

fn print_gate(decision: &GatingDecision) {
    println!();
    if decision.allow_allocation {
        println!("Allocation gate: PASS");
    } else {
        let files: Vec<&str> = decision
            .blocking_files
            .iter()
            .map(EntityKind::as_str)
            .collect();
        println!("Allocation gate: BLOCKED ({})", files.join(", "));
    }
}

fn count_severity(issues: &[Issue], severity: Severity) -> usize {
    issues
        .iter()
        .filter(|issue| issue.severity() == severity)
        .count()
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Info => Cell::new("INFO").fg(Color::Blue),
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn file_cell(kind: EntityKind) -> Cell {
    Cell::new(kind)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    value.map_or_else(|| dim_cell("-"), Cell::new)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
