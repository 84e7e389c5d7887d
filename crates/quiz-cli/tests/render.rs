//! Argument parsing and end-to-end render runs.

use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use quiz_cli::cli::{Cli, Command, DurationPolicyArg, RenderArgs};
use quiz_cli::commands::{run_render, write_diagnostics_json};
use quiz_model::DurationPolicy;

const HEADER: &str = "Nome,Nota média das primeiras tentativas,Nota média de todas as tentativas,\
Média das notas das últimas tentativas,Média das notas das tentativas como maior nota,\
Nota mediana (para primeira tentativa),Desvio padrão (para primeira tentativa),Abrir para,Abrir o questionário";

fn write_export(dir: &Path, name: &str, rows: &[&str]) {
    let mut content = format!("Relatório\n{HEADER}\n");
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(dir.join(name), content).unwrap();
}

fn render_args(csv_dir: &Path, output: PathBuf) -> RenderArgs {
    match Cli::parse_from([
        "quiz-dashboard",
        "render",
        csv_dir.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ])
    .command
    {
        Command::Render(args) => args,
        Command::Columns => unreachable!(),
    }
}

#[test]
fn render_defaults() {
    let cli = Cli::try_parse_from(["quiz-dashboard", "render"]).unwrap();
    let Command::Render(args) = cli.command else {
        panic!("expected render");
    };
    assert_eq!(args.csv_dir, PathBuf::from("csv"));
    assert_eq!(args.output, PathBuf::from("quiz-dashboard.html"));
    assert_eq!(args.bins, 10);
    assert_eq!(args.skip_rows, 1);
    assert_eq!(args.duration_policy, DurationPolicyArg::RejectFile);
    assert!(args.diagnostics_json.is_none());
    assert!(args.title.is_none());
}

#[test]
fn render_flags_parse() {
    let cli = Cli::try_parse_from([
        "quiz-dashboard",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "render",
        "exports",
        "--bins",
        "20",
        "--duration-policy",
        "null-cell",
        "--skip-rows",
        "0",
        "--title",
        "Turma B",
    ])
    .unwrap();
    let Command::Render(args) = cli.command else {
        panic!("expected render");
    };
    assert_eq!(args.csv_dir, PathBuf::from("exports"));
    assert_eq!(args.bins, 20);
    assert_eq!(
        DurationPolicy::from(args.duration_policy),
        DurationPolicy::NullCell
    );
    assert_eq!(args.skip_rows, 0);
    assert_eq!(args.title.as_deref(), Some("Turma B"));
}

#[test]
fn unknown_duration_policy_is_rejected() {
    assert!(
        Cli::try_parse_from(["quiz-dashboard", "render", "--duration-policy", "ignore"]).is_err()
    );
}

#[test]
fn columns_subcommand_parses() {
    let cli = Cli::try_parse_from(["quiz-dashboard", "-v", "columns"]).unwrap();
    assert!(matches!(cli.command, Command::Columns));
}

#[test]
fn render_writes_dashboard_and_succeeds() {
    let dir = TempDir::new().unwrap();
    let csv_dir = dir.path().join("csv");
    std::fs::create_dir(&csv_dir).unwrap();
    write_export(
        &csv_dir,
        "turma_a.csv",
        &[
            "Quiz 1,\"80,5%\",\"70%\",\"75%\",\"90%\",\"82\",\"10,5\",\"1 dia 2 horas\",\"segunda-feira, 4 mar. 2024\"",
            "Quiz 2,\"60%\",\"65%\",\"70%\",\"85%\",\"61\",\"12\",\"0 dias 5 horas\",\"terça-feira, 5 mar. 2024\"",
        ],
    );

    let output = dir.path().join("site").join("index.html");
    let result = run_render(&render_args(&csv_dir, output.clone())).unwrap();

    assert!(!result.has_errors());
    assert_eq!(result.dataset.frame.height(), 2);
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("Dados Combinados dos CSVs:"));
    assert!(html.contains("<td>80.5</td>"));
    assert!(html.contains("<td>26</td>"));
    assert!(html.contains("<td>2024-03-04</td>"));
}

#[test]
fn render_with_failed_file_reports_errors() {
    let dir = TempDir::new().unwrap();
    write_export(
        dir.path(),
        "ruim.csv",
        &["Quiz 1,\"80%\",\"70%\",\"75%\",\"90%\",\"82\",\"10\",\"cinco horas\",\"segunda-feira, 4 mar. 2024\""],
    );
    let output = dir.path().join("out.html");
    let json = dir.path().join("reports").join("diagnostics.json");

    let mut args = render_args(dir.path(), output.clone());
    args.diagnostics_json = Some(json.clone());
    let result = run_render(&args).unwrap();

    assert!(result.has_errors());
    assert!(result.dataset.is_empty());
    assert!(output.exists());

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(document["rows"], 0);
    assert_eq!(document["sources"][0]["status"], "failed");
    let kinds: Vec<&str> = document["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["file_processing", "empty_dataset"]);
}

#[test]
fn render_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let args = render_args(&dir.path().join("nope"), dir.path().join("out.html"));
    let err = run_render(&args).unwrap_err();
    assert!(format!("{err:#}").contains("directory not found"));
}

#[test]
fn diagnostics_json_for_clean_dataset() {
    let dir = TempDir::new().unwrap();
    write_export(
        dir.path(),
        "a.csv",
        &["Quiz 1,\"80%\",\"70%\",\"75%\",\"90%\",\"82\",\"10\",\"0 dias 1 horas\",\"segunda-feira, 4 mar. 2024\""],
    );
    let dataset = quiz_ingest::load_dataset(dir.path(), &quiz_model::LoadOptions::default()).unwrap();
    let json = dir.path().join("d.json");
    write_diagnostics_json(&json, &dataset).unwrap();

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(document["rows"], 1);
    assert_eq!(document["diagnostics"].as_array().unwrap().len(), 0);
    assert_eq!(document["sources"][0]["status"], "loaded");
}
