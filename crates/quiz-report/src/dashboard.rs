//! HTML dashboard page.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, DataFrame};
use quick_xml::Writer;
use quick_xml::events::{BytesStart, BytesText, Event};
use tracing::info;

use quiz_ingest::LoadedDataset;
use quiz_model::{Diagnostic, Severity, SourceStatus, SourceSummary, display_name};
use quiz_transform::frame::any_to_string;

use crate::common::{end_element, start_element, write_text_element, write_text_element_with};
use crate::figure::{Figure, build_figures};
use crate::options::ReportOptions;
use crate::svg::write_histogram_svg;

/// Caption above the combined data table.
pub const TABLE_CAPTION: &str = "Dados Combinados dos CSVs:";

/// Shown instead of the table and charts when there is nothing to plot.
pub const EMPTY_STATE_MESSAGE: &str =
    "Nenhum dado disponível: nenhum arquivo CSV produziu linhas utilizáveis.";

const STYLE: &str = "
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 1100px; color: #222; }
h1 { font-size: 1.6rem; }
.banner { border-radius: 4px; padding: 0.5rem 0.75rem; margin: 0.35rem 0; }
.banner.warning { background: #fff4d6; border: 1px solid #e0b400; }
.banner.error { background: #fde2e1; border: 1px solid #d33; }
.sources li.failed { color: #b00; }
.table-wrap { max-height: 420px; overflow: auto; border: 1px solid #ddd; }
table { border-collapse: collapse; font-size: 0.85rem; width: 100%; }
th, td { border-bottom: 1px solid #eee; padding: 0.25rem 0.5rem; text-align: left; white-space: nowrap; }
thead th { position: sticky; top: 0; background: #f5f5f5; }
td.index { color: #888; }
.empty { font-style: italic; color: #666; }
.chart { max-width: 100%; height: auto; }
footer { margin-top: 2rem; font-size: 0.8rem; color: #888; }
";

/// Renders the full dashboard page for a loaded dataset.
pub fn render_dashboard(dataset: &LoadedDataset, options: &ReportOptions) -> Result<String> {
    let figures = if dataset.is_empty() {
        Vec::new()
    } else {
        build_figures(&dataset.frame, options)?
    };

    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    xml.write_event(Event::DocType(BytesText::from_escaped("html")))?;

    let mut root = BytesStart::new("html");
    root.push_attribute(("lang", "pt-BR"));
    xml.write_event(Event::Start(root))?;

    start_element(&mut xml, "head", &[])?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "utf-8"));
    xml.write_event(Event::Empty(meta))?;
    write_text_element(&mut xml, "title", &options.title)?;
    start_element(&mut xml, "style", &[])?;
    xml.write_event(Event::Text(BytesText::from_escaped(STYLE)))?;
    end_element(&mut xml, "style")?;
    end_element(&mut xml, "head")?;

    start_element(&mut xml, "body", &[])?;
    write_text_element(&mut xml, "h1", &options.title)?;
    write_banners(&mut xml, &dataset.diagnostics)?;
    write_sources(&mut xml, &dataset.sources)?;

    if dataset.is_empty() {
        write_text_element_with(&mut xml, "p", &[("class", "empty")], EMPTY_STATE_MESSAGE)?;
    } else {
        write_text_element(&mut xml, "h2", TABLE_CAPTION)?;
        write_table(&mut xml, &dataset.frame)?;
        for figure in &figures {
            write_figure(&mut xml, figure)?;
        }
    }

    let generated = format!(
        "Gerado em {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    write_text_element(&mut xml, "footer", &generated)?;
    end_element(&mut xml, "body")?;
    end_element(&mut xml, "html")?;

    String::from_utf8(xml.into_inner()).context("dashboard markup is not UTF-8")
}

/// Renders the dashboard and writes it to `output_path`, creating parent
/// directories as needed.
pub fn write_dashboard(
    output_path: &Path,
    dataset: &LoadedDataset,
    options: &ReportOptions,
) -> Result<()> {
    let html = render_dashboard(dataset, options)?;
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
    }
    fs::write(output_path, html).with_context(|| format!("write {}", output_path.display()))?;
    info!(
        output = %output_path.display(),
        rows = dataset.frame.height(),
        "dashboard written"
    );
    Ok(())
}

fn write_banners<W: Write>(xml: &mut Writer<W>, diagnostics: &[Diagnostic]) -> Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }
    start_element(xml, "section", &[("class", "diagnostics")])?;
    for diagnostic in diagnostics {
        let class = match diagnostic.severity {
            Severity::Warning => "banner warning",
            Severity::Error => "banner error",
        };
        start_element(xml, "div", &[("class", class), ("data-kind", diagnostic.kind.as_str())])?;
        write_text_element(xml, "strong", diagnostic.severity.as_str())?;
        let mut text = format!(" {}", diagnostic.message);
        if let Some(row) = diagnostic.row {
            text.push_str(&format!(" (row {})", row + 1));
        }
        xml.write_event(Event::Text(BytesText::new(&text)))?;
        end_element(xml, "div")?;
    }
    end_element(xml, "section")
}

fn write_sources<W: Write>(xml: &mut Writer<W>, sources: &[SourceSummary]) -> Result<()> {
    if sources.is_empty() {
        return Ok(());
    }
    start_element(xml, "section", &[("class", "sources")])?;
    write_text_element(xml, "h2", "Arquivos CSV")?;
    start_element(xml, "ul", &[])?;
    for source in sources {
        let name = display_name(&source.path);
        match &source.status {
            SourceStatus::Loaded => {
                let text = format!("{name}: {} linhas", source.rows);
                write_text_element_with(xml, "li", &[("class", "loaded")], &text)?;
            }
            SourceStatus::Failed(reason) => {
                let text = format!("{name}: ignorado ({reason})");
                write_text_element_with(xml, "li", &[("class", "failed")], &text)?;
            }
        }
    }
    end_element(xml, "ul")?;
    end_element(xml, "section")
}

fn write_table<W: Write>(xml: &mut Writer<W>, frame: &DataFrame) -> Result<()> {
    start_element(xml, "div", &[("class", "table-wrap")])?;
    start_element(xml, "table", &[("class", "data")])?;

    start_element(xml, "thead", &[])?;
    start_element(xml, "tr", &[])?;
    write_text_element(xml, "th", "")?;
    for name in frame.get_column_names() {
        write_text_element(xml, "th", name.as_str())?;
    }
    end_element(xml, "tr")?;
    end_element(xml, "thead")?;

    start_element(xml, "tbody", &[])?;
    let columns = frame.get_columns();
    for idx in 0..frame.height() {
        start_element(xml, "tr", &[])?;
        write_text_element_with(xml, "td", &[("class", "index")], &idx.to_string())?;
        for column in columns {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            write_text_element(xml, "td", &any_to_string(value))?;
        }
        end_element(xml, "tr")?;
    }
    end_element(xml, "tbody")?;

    end_element(xml, "table")?;
    end_element(xml, "div")
}

fn write_figure<W: Write>(xml: &mut Writer<W>, figure: &Figure) -> Result<()> {
    let column = figure.spec.column.column_name();
    start_element(xml, "section", &[("class", "figure"), ("data-column", column)])?;
    write_text_element(xml, "h2", figure.spec.subheading)?;
    write_histogram_svg(xml, figure)?;
    end_element(xml, "section")
}
