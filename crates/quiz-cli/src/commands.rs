use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use quiz_ingest::{LoadedDataset, load_dataset};
use quiz_model::{LoadOptions, column_catalogue};
use quiz_report::{ReportOptions, write_dashboard};

use crate::cli::RenderArgs;
use crate::summary::apply_table_style;
use crate::types::RenderResult;

pub fn run_columns() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Column", "Role", "Description"]);
    apply_table_style(&mut table);
    for entry in column_catalogue() {
        table.add_row(vec![entry.name, entry.role.as_str(), entry.description]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_render(args: &RenderArgs) -> Result<RenderResult> {
    let render_span = info_span!("render", csv_dir = %args.csv_dir.display());
    let _render_guard = render_span.enter();

    let load_options = LoadOptions::new()
        .with_skip_rows(args.skip_rows)
        .with_duration_policy(args.duration_policy.into());
    let dataset = load_dataset(&args.csv_dir, &load_options)
        .with_context(|| format!("load {}", args.csv_dir.display()))?;

    let mut report_options = ReportOptions::new().with_bins(args.bins);
    if let Some(title) = &args.title {
        report_options = report_options.with_title(title.clone());
    }
    write_dashboard(&args.output, &dataset, &report_options)?;

    if let Some(path) = &args.diagnostics_json {
        write_diagnostics_json(path, &dataset)?;
        info!(output = %path.display(), "diagnostics written");
    }

    Ok(RenderResult {
        dataset,
        output: args.output.clone(),
        diagnostics_json: args.diagnostics_json.clone(),
    })
}

/// Writes the per-file outcomes and every diagnostic as pretty JSON.
pub fn write_diagnostics_json(path: &Path, dataset: &LoadedDataset) -> Result<()> {
    let document = serde_json::json!({
        "directory": dataset.directory,
        "rows": dataset.frame.height(),
        "sources": dataset.sources,
        "diagnostics": dataset.diagnostics,
    });
    let text = serde_json::to_string_pretty(&document).context("serialize diagnostics")?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
    }
    fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
