use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use landing_cli::pipeline::{CheckReport, RunReport};
use landing_validate::{Rule, RuleViolations};

pub fn print_run_summary(report: &RunReport) {
    println!("Run: {}", report.run_id);
    println!(
        "Processed: {}",
        report.summary.processed_timestamp.to_rfc3339()
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Count"),
        header_cell("Destination"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Total"),
        Cell::new(report.summary.total_records),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new("Valid"),
        count_cell(report.summary.valid_records, Color::Green),
        dim_cell("-"),
    ]);
    table.add_row(vec![
        Cell::new("Written (deduplicated)"),
        Cell::new(report.interim.rows_written),
        Cell::new(&report.interim.destination),
    ]);
    let malformed_destination = match &report.malformed {
        Some(written) => Cell::new(&written.destination),
        None => dim_cell("-"),
    };
    table.add_row(vec![
        Cell::new("Malformed"),
        count_cell(report.summary.malformed_records, Color::Red),
        malformed_destination,
    ]);
    println!("{table}");

    if !report.interim.partitions.is_empty() {
        println!("Partitions:");
        for partition in &report.interim.partitions {
            println!("  {partition}");
        }
    }
    print_violations(&report.violations);
    if !report.warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in &report.warnings {
            eprintln!("- {warning}");
        }
    }
}

pub fn print_check_summary(report: &CheckReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Records"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total"), Cell::new(report.total_records)]);
    table.add_row(vec![
        Cell::new("Valid"),
        count_cell(report.valid_records, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Malformed"),
        count_cell(report.malformed_records, Color::Red),
    ]);
    println!("{table}");
    print_violations(&report.violations);
}

fn print_violations(violations: &RuleViolations) {
    let failing: Vec<(Rule, usize)> = Rule::ALL
        .into_iter()
        .map(|rule| (rule, violations.count(rule)))
        .filter(|(_, count)| *count > 0)
        .collect();
    if failing.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Rule"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (rule, count) in failing {
        table.add_row(vec![
            Cell::new(rule.description()),
            Cell::new(count).fg(Color::Yellow),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell("0")
    } else {
        Cell::new(count).fg(color)
    }
}
