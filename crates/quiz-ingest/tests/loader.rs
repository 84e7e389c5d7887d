//! End-to-end loading of quiz export directories.

use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::DataType;
use tempfile::TempDir;

use quiz_ingest::{IngestError, load_dataset};
use quiz_model::{
    DATE_COLUMN, DURATION_HOURS_COLUMN, DiagnosticKind, DurationPolicy, LoadOptions, Severity,
    SourceStatus, StatColumn,
};

const FULL_HEADER: &str = "Nome, Nota média das primeiras tentativas,Nota média de todas as tentativas,\
Média das notas das últimas tentativas,Média das notas das tentativas como maior nota,\
Nota mediana (para primeira tentativa),Desvio padrão (para primeira tentativa),Abrir para,Abrir o questionário";

fn write_csv(dir: &Path, name: &str, header: &str, rows: &[&str]) {
    let mut content = String::from("Relatório de questionários\n");
    content.push_str(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(dir.join(name), content).unwrap();
}

fn full_row(name: &str, mean: &str, duration: &str, date: &str) -> String {
    format!("{name},\"{mean}\",\"70,0%\",\"75%\",\"90,25\",\"80\",\"12,5\",\"{duration}\",\"{date}\"")
}

fn f64_column(frame: &polars::prelude::DataFrame, name: &str) -> Vec<Option<f64>> {
    frame
        .column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

#[test]
fn loads_and_normalizes_two_files_in_name_order() {
    let dir = TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "b_turma.csv",
        FULL_HEADER,
        &[&full_row("Quiz 3", "60%", "0 dias 4 horas", "sexta-feira, 5 abr. 2024")],
    );
    write_csv(
        dir.path(),
        "a_turma.csv",
        FULL_HEADER,
        &[
            &full_row("Quiz 1", "85,50%", "2 dias, 5 horas", "quarta-feira, 3 jan. 2024"),
            &full_row("Quiz 2", "", "1 dia 0 horas", "quinta-feira, 15 fev. 2024"),
        ],
    );

    let dataset = load_dataset(dir.path(), &LoadOptions::default()).unwrap();
    assert_eq!(dataset.frame.height(), 3);
    assert!(!dataset.has_errors());
    assert_eq!(dataset.warning_count(), 0);
    assert_eq!(dataset.loaded_file_count(), 2);

    let names: Vec<String> = dataset
        .sources
        .iter()
        .map(|source| source.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_turma.csv", "b_turma.csv"]);
    assert_eq!(dataset.sources[0].rows, 2);

    let mean = StatColumn::FirstAttemptMean.column_name();
    assert_eq!(dataset.frame.column(mean).unwrap().dtype(), &DataType::Float64);
    assert_eq!(
        f64_column(&dataset.frame, mean),
        vec![Some(85.5), None, Some(60.0)]
    );
    assert_eq!(
        f64_column(&dataset.frame, DURATION_HOURS_COLUMN),
        vec![Some(53.0), Some(24.0), Some(4.0)]
    );

    let data = dataset.frame.column(DATE_COLUMN).unwrap();
    assert_eq!(data.dtype(), &DataType::Date);
    let first_day = data.cast(&DataType::Int32).unwrap().i32().unwrap().get(0);
    let expected = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        - NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    assert_eq!(first_day, Some(expected.num_days() as i32));
}

#[test]
fn missing_stat_column_keeps_rows_and_warns() {
    let dir = TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "completo.csv",
        FULL_HEADER,
        &[&full_row("Quiz 1", "50%", "0 dias 1 horas", "segunda-feira, 1 jul. 2024")],
    );
    let partial_header = FULL_HEADER.replace(",Nota mediana (para primeira tentativa)", "");
    write_csv(
        dir.path(),
        "parcial.csv",
        &partial_header,
        &[
            "Quiz 2,\"40%\",\"70%\",\"75%\",\"90\",\"12,5\",0 dias 2 horas,\"terça-feira, 2 jul. 2024\"",
            "Quiz 3,\"45%\",\"70%\",\"75%\",\"90\",\"11\",0 dias 3 horas,\"terça-feira, 2 jul. 2024\"",
        ],
    );

    let dataset = load_dataset(dir.path(), &LoadOptions::default()).unwrap();
    assert_eq!(dataset.frame.height(), 3);
    assert!(!dataset.has_errors());

    let warnings: Vec<_> = dataset
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, DiagnosticKind::MissingColumn);
    assert_eq!(
        warnings[0].message,
        "Column Nota mediana (para primeira tentativa) not found in the file parcial.csv."
    );

    let median = StatColumn::FirstAttemptMedian.column_name();
    assert_eq!(
        f64_column(&dataset.frame, median),
        vec![Some(80.0), None, None]
    );
    let std_dev = StatColumn::FirstAttemptStdDev.column_name();
    assert_eq!(
        f64_column(&dataset.frame, std_dev),
        vec![Some(12.5), Some(12.5), Some(11.0)]
    );
}

#[test]
fn malformed_duration_excludes_only_that_file() {
    let dir = TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "bom.csv",
        FULL_HEADER,
        &[&full_row("Quiz 1", "50%", "0 dias 1 horas", "segunda-feira, 1 jul. 2024")],
    );
    write_csv(
        dir.path(),
        "ruim.csv",
        FULL_HEADER,
        &[&full_row("Quiz 2", "50%", "3 horas", "segunda-feira, 1 jul. 2024")],
    );

    let dataset = load_dataset(dir.path(), &LoadOptions::default()).unwrap();
    assert_eq!(dataset.frame.height(), 1);
    assert!(dataset.has_errors());
    assert_eq!(dataset.error_count(), 1);

    let error = &dataset.diagnostics[0];
    assert_eq!(error.kind, DiagnosticKind::FileProcessing);
    assert_eq!(error.file_name(), "ruim.csv");
    assert!(error.message.starts_with("Error processing file ruim.csv:"));

    assert!(dataset.sources[0].is_loaded());
    assert!(matches!(dataset.sources[1].status, SourceStatus::Failed(_)));
}

#[test]
fn malformed_duration_is_nulled_under_null_cell_policy() {
    let dir = TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "ruim.csv",
        FULL_HEADER,
        &[
            &full_row("Quiz 1", "50%", "3 horas", "segunda-feira, 1 jul. 2024"),
            &full_row("Quiz 2", "50%", "1 dia 1 hora", "segunda-feira, 1 jul. 2024"),
        ],
    );

    let options = LoadOptions::new().with_duration_policy(DurationPolicy::NullCell);
    let dataset = load_dataset(dir.path(), &options).unwrap();
    assert_eq!(dataset.frame.height(), 2);
    assert_eq!(
        f64_column(&dataset.frame, DURATION_HOURS_COLUMN),
        vec![None, Some(25.0)]
    );
    assert_eq!(dataset.error_count(), 1);
    assert_eq!(dataset.diagnostics[0].kind, DiagnosticKind::DurationParse);
    assert_eq!(dataset.diagnostics[0].row, Some(0));
}

#[test]
fn unparseable_date_is_null_with_error() {
    let dir = TempDir::new().unwrap();
    write_csv(
        dir.path(),
        "datas.csv",
        FULL_HEADER,
        &[&full_row("Quiz 1", "50%", "0 dias 1 horas", "garbage")],
    );

    let dataset = load_dataset(dir.path(), &LoadOptions::default()).unwrap();
    assert_eq!(dataset.frame.height(), 1);
    assert_eq!(dataset.frame.column(DATE_COLUMN).unwrap().null_count(), 1);
    assert_eq!(dataset.error_count(), 1);
    assert_eq!(dataset.diagnostics[0].kind, DiagnosticKind::DateParse);
}

#[test]
fn empty_directory_yields_empty_dataset_diagnostic() {
    let dir = TempDir::new().unwrap();
    let dataset = load_dataset(dir.path(), &LoadOptions::default()).unwrap();

    assert!(dataset.is_empty());
    assert!(dataset.sources.is_empty());
    assert_eq!(dataset.diagnostics.len(), 1);
    assert_eq!(dataset.diagnostics[0].kind, DiagnosticKind::EmptyDataset);
    assert!(dataset.diagnostics[0].message.starts_with("No CSV files found"));
}

#[test]
fn all_files_failing_yields_empty_dataset_diagnostic() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("vazio.csv"), "").unwrap();

    let dataset = load_dataset(dir.path(), &LoadOptions::default()).unwrap();
    assert!(dataset.is_empty());
    let kinds: Vec<DiagnosticKind> = dataset.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::FileProcessing, DiagnosticKind::EmptyDataset]
    );
}

#[test]
fn missing_directory_is_fatal() {
    let dir = TempDir::new().unwrap();
    let err = load_dataset(&dir.path().join("csv"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn blank_metadata_line_keeps_the_header() {
    let dir = TempDir::new().unwrap();
    let content = format!(
        "\n{FULL_HEADER}\n{}\n",
        full_row("Quiz 1", "85%", "0 dias 3 horas", "quarta-feira, 3 jan. 2024")
    );
    std::fs::write(dir.path().join("sem_titulo.csv"), content).unwrap();

    let dataset = load_dataset(dir.path(), &LoadOptions::default()).unwrap();
    assert_eq!(dataset.frame.height(), 1);
    assert!(dataset.diagnostics.is_empty());
    assert_eq!(
        f64_column(&dataset.frame, DURATION_HOURS_COLUMN),
        vec![Some(3.0)]
    );
}
