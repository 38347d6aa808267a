use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use basket_core::{CleanJobReport, RunOutcome};
use basket_model::ValidationReport;
use basket_validate::DatasetSummary;

use basket_cli::records::frame_rows;

pub fn print_run_summary(outcome: &RunOutcome) {
    println!("Dataset: {}", outcome.merged_path.display());
    println!("Report: {}", outcome.report_path.display());
    let stats = outcome.merge_stats;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Products"),
        header_cell("Unmatched aisles"),
        header_cell("Unmatched departments"),
        header_cell("Orders"),
        header_cell("Users"),
        header_cell("Size (MB)"),
        header_cell("Errors"),
        header_cell("Schema"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 7, CellAlignment::Center);
    table.add_row(vec![
        Cell::new(stats.products),
        count_cell(Some(stats.unmatched_aisles), Color::Yellow),
        count_cell(Some(stats.unmatched_departments), Color::Yellow),
        Cell::new(stats.orders_considered),
        Cell::new(stats.users),
        Cell::new(format!("{:.2}", outcome.report.file_size_mb())),
        count_cell(Some(outcome.report.error_count()), Color::Red),
        schema_cell(outcome.schema_valid()),
    ]);
    println!("{table}");

    print_metrics(&outcome.report);
    if !outcome.input_cleaning.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Cleaned table"),
            header_cell("Rows in"),
            header_cell("Rows out"),
            header_cell("Duplicates"),
            header_cell("Filled"),
        ]);
        apply_table_style(&mut table);
        for index in 1..5 {
            align_column(&mut table, index, CellAlignment::Right);
        }
        for (source, stats) in &outcome.input_cleaning {
            table.add_row(vec![
                Cell::new(source),
                Cell::new(stats.input_rows),
                Cell::new(stats.output_rows),
                count_cell(Some(stats.duplicates_removed), Color::Yellow),
                count_cell(Some(stats.cells_filled), Color::Yellow),
            ]);
        }
        println!("{table}");
    }
    if !outcome.source_findings.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Source"),
            header_cell("Column"),
            header_cell("Finding"),
        ]);
        apply_table_style(&mut table);
        for finding in &outcome.source_findings {
            for issue in &finding.issues {
                table.add_row(vec![
                    Cell::new(finding.table),
                    dim_cell(issue.column().unwrap_or("-")),
                    Cell::new(issue).fg(Color::Yellow),
                ]);
            }
        }
        println!("{table}");
    }
    print_errors(outcome.report.validation_errors());
}

pub fn print_validation_report(report: &ValidationReport) {
    println!("Validated at: {}", report.timestamp());
    println!("Records: {}", report.total_records());
    println!("Dataset size: {:.2} MB", report.file_size_mb());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Schema"), header_cell("Errors")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        schema_cell(report.schema_valid()),
        count_cell(Some(report.error_count()), Color::Red),
    ]);
    println!("{table}");
    print_metrics(report);
    print_errors(report.validation_errors());
}

pub fn print_clean_report(report: &CleanJobReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Rows before"),
        header_cell("Rows after"),
        header_cell("Missing before"),
        header_cell("Missing after"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for index in 2..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for file in &report.processed {
        table.add_row(vec![
            Cell::new(file.table.file_name()),
            Cell::new("cleaned").fg(Color::Green),
            Cell::new(file.before.rows),
            Cell::new(file.after.rows),
            count_cell(Some(file.before.total_nulls()), Color::Yellow),
            count_cell(Some(file.after.total_nulls()), Color::Yellow),
        ]);
    }
    for table_name in &report.skipped {
        table.add_row(vec![
            dim_cell(table_name.file_name()),
            dim_cell("skipped"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    for failed in &report.failed {
        table.add_row(vec![
            Cell::new(failed.table.file_name()),
            Cell::new("failed")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
        ]);
    }
    println!("{table}");
    if !report.failed.is_empty() {
        eprintln!("Errors:");
        for failed in &report.failed {
            eprintln!("- {}: {}", failed.table.file_name(), failed.message);
        }
    }
}

pub fn print_dataset_summary(summary: &DatasetSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total records"), Cell::new(summary.total_records)]);
    table.add_row(vec![Cell::new("Products"), Cell::new(summary.total_products)]);
    table.add_row(vec![Cell::new("Aisles"), Cell::new(summary.total_aisles)]);
    table.add_row(vec![Cell::new("Departments"), Cell::new(summary.total_departments)]);
    table.add_row(vec![
        Cell::new("Average name length"),
        Cell::new(summary.avg_product_name_length),
    ]);
    table.add_row(vec![
        Cell::new("Data quality score"),
        Cell::new(summary.data_quality_score),
    ]);
    println!("{table}");
}

pub fn print_filter_result(df: &DataFrame) {
    println!("Records: {}", df.height());
    if df.height() == 0 {
        return;
    }
    let (header, rows) = frame_rows(df);
    let mut table = Table::new();
    table.set_header(header
            .iter()
            .map(String::as_str)
            .map(header_cell)
            .collect::<Vec<_>>());
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(row);
    }
    println!("{table}");
}

fn print_metrics(report: &ValidationReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Quality metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (name, value) in report.data_quality_metrics() {
        table.add_row(vec![Cell::new(name), Cell::new(format!("{value:.3}"))]);
    }
    println!("{table}");
}

fn print_errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("Validation errors:");
    for error in errors {
        eprintln!("- {error}");
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn schema_cell(valid: bool) -> Cell {
    if valid {
        Cell::new("valid").fg(Color::Green)
    } else {
        Cell::new("invalid")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
