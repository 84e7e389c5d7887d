use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use quiz_model::{Diagnostic, Severity, SourceStatus, SourceSummary, display_name};

use crate::types::RenderResult;

pub fn print_summary(result: &RenderResult) {
    let dataset = &result.dataset;
    println!("Input: {}", dataset.directory.display());
    println!("Dashboard: {}", result.output.display());
    if let Some(path) = &result.diagnostics_json {
        println!("Diagnostics: {}", path.display());
    }
    println!("{}", source_table(result));
    if let Some(table) = diagnostic_table(&dataset.diagnostics) {
        println!();
        println!("Diagnostics:");
        println!("{table}");
    }
}

fn source_table(result: &RenderResult) -> Table {
    let dataset = &result.dataset;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Status"),
        header_cell("Errors"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    for source in &dataset.sources {
        let (errors, warnings) = counts_for(&dataset.diagnostics, source);
        let status = match &source.status {
            SourceStatus::Loaded => Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            SourceStatus::Failed(_) => Cell::new("FAILED")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        };
        table.add_row(vec![
            Cell::new(display_name(&source.path))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(source.rows),
            status,
            count_cell(errors, Color::Red),
            count_cell(warnings, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(dataset.frame.height()).add_attribute(Attribute::Bold),
        dim_cell(format!(
            "{}/{} loaded",
            dataset.loaded_file_count(),
            dataset.sources.len()
        )),
        count_cell(dataset.error_count(), Color::Red).add_attribute(Attribute::Bold),
        count_cell(dataset.warning_count(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

fn counts_for(diagnostics: &[Diagnostic], source: &SourceSummary) -> (usize, usize) {
    diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.file.as_deref() == Some(source.path.as_path()))
        .fold((0, 0), |(errors, warnings), diagnostic| {
            match diagnostic.severity {
                Severity::Error => (errors + 1, warnings),
                Severity::Warning => (errors, warnings + 1),
            }
        })
}

fn diagnostic_table(diagnostics: &[Diagnostic]) -> Option<Table> {
    if diagnostics.is_empty() {
        return None;
    }
    let mut ordered: Vec<&Diagnostic> = diagnostics.iter().collect();
    // Errors first; stable within a severity.
    ordered.sort_by(|a, b| b.severity.cmp(&a.severity));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Kind"),
        header_cell("File"),
        header_cell("Column"),
        header_cell("Row"),
        header_cell("Message"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for diagnostic in ordered {
        table.add_row(vec![
            severity_cell(diagnostic.severity),
            Cell::new(diagnostic.kind.as_str()),
            Cell::new(diagnostic.file_name()),
            optional_cell(diagnostic.column.as_deref()),
            match diagnostic.row {
                Some(row) => Cell::new(row + 1),
                None => dim_cell("-"),
            },
            Cell::new(&diagnostic.message),
        ]);
    }
    Some(table)
}

pub fn apply_table_style(table: &mut Table) {
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
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(50)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    use polars::prelude::DataFrame;
    use quiz_ingest::LoadedDataset;

    fn result(diagnostics: Vec<Diagnostic>) -> RenderResult {
        RenderResult {
            dataset: LoadedDataset {
                directory: PathBuf::from("csv"),
                frame: DataFrame::empty(),
                diagnostics,
                sources: vec![
                    SourceSummary::loaded(PathBuf::from("csv/a.csv"), 0),
                    SourceSummary::failed(PathBuf::from("csv/b.csv"), "bad"),
                ],
            },
            output: PathBuf::from("out.html"),
            diagnostics_json: None,
        }
    }

    #[test]
    fn test_counts_per_source() {
        let diagnostics = vec![
            Diagnostic::missing_column(Path::new("csv/a.csv"), "Abrir para"),
            Diagnostic::file_processing(Path::new("csv/b.csv"), "bad"),
            Diagnostic::empty_dataset(Path::new("csv"), 2),
        ];
        let result = result(diagnostics);
        let sources = &result.dataset.sources;
        assert_eq!(counts_for(&result.dataset.diagnostics, &sources[0]), (0, 1));
        assert_eq!(counts_for(&result.dataset.diagnostics, &sources[1]), (1, 0));
    }

    #[test]
    fn test_tables_render() {
        let result = result(vec![Diagnostic::file_processing(
            Path::new("csv/b.csv"),
            "bad",
        )]);
        let sources = source_table(&result).to_string();
        assert!(sources.contains("a.csv"));
        assert!(sources.contains("FAILED"));
        assert!(sources.contains("TOTAL"));

        let issues = diagnostic_table(&result.dataset.diagnostics)
            .unwrap()
            .to_string();
        assert!(issues.contains("ERROR"));
        assert!(diagnostic_table(&[]).is_none());
    }
}
