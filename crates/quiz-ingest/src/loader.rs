//! Dataset assembly: every discovered export is read and cleaned in
//! isolation, then the survivors are stacked into one frame.

use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::{Column, DataFrame, DataType, PlSmallStr};
use tracing::{error, info, info_span, warn};

use quiz_model::{
    Diagnostic, LoadOptions, Severity, SourceSummary, count_by_severity, display_name,
};
use quiz_transform::{CleanedFrame, clean_frame};

use crate::csv::read_quiz_csv;
use crate::discovery::list_csv_files;
use crate::error::Result;

/// The combined dataset together with what happened while building it.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Directory the exports were discovered in.
    pub directory: PathBuf,
    /// Rows of every successfully processed file, in discovery order.
    pub frame: DataFrame,
    pub diagnostics: Vec<Diagnostic>,
    /// One entry per discovered file, in discovery order.
    pub sources: Vec<SourceSummary>,
}

impl LoadedDataset {
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        count_by_severity(&self.diagnostics, Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        count_by_severity(&self.diagnostics, Severity::Warning)
    }

    pub fn loaded_file_count(&self) -> usize {
        self.sources.iter().filter(|s| s.is_loaded()).count()
    }
}

/// Loads every CSV export in `dir` into one combined frame.
///
/// Only directory-level problems are returned as errors. A file that cannot be
/// read or cleaned is recorded as a file-processing diagnostic and left out;
/// the remaining files still load.
pub fn load_dataset(dir: &Path, options: &LoadOptions) -> Result<LoadedDataset> {
    let span = info_span!("load", directory = %dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let files = list_csv_files(dir)?;
    info!(file_count = files.len(), "discovered csv files");

    let mut frames = Vec::with_capacity(files.len());
    let mut diagnostics = Vec::new();
    let mut sources = Vec::with_capacity(files.len());

    for path in &files {
        let file_span = info_span!("file", file = %display_name(path));
        let _file_guard = file_span.enter();

        match process_file(path, options) {
            Ok(CleanedFrame {
                frame,
                diagnostics: file_diagnostics,
            }) => {
                file_diagnostics.iter().for_each(log_diagnostic);
                diagnostics.extend(file_diagnostics);
                info!(rows = frame.height(), columns = frame.width(), "file loaded");
                sources.push(SourceSummary::loaded(path.clone(), frame.height()));
                frames.push(frame);
            }
            Err(err) => {
                let diagnostic = Diagnostic::file_processing(path, &err);
                log_diagnostic(&diagnostic);
                diagnostics.push(diagnostic);
                sources.push(SourceSummary::failed(path.clone(), err.to_string()));
            }
        }
    }

    let frame = concat_frames(frames)?;
    if frame.height() == 0 {
        let diagnostic = Diagnostic::empty_dataset(dir, files.len());
        log_diagnostic(&diagnostic);
        diagnostics.push(diagnostic);
    }

    info!(
        rows = frame.height(),
        columns = frame.width(),
        files_loaded = sources.iter().filter(|s| s.is_loaded()).count(),
        files_failed = sources.iter().filter(|s| !s.is_loaded()).count(),
        warnings = count_by_severity(&diagnostics, Severity::Warning),
        errors = count_by_severity(&diagnostics, Severity::Error),
        duration_ms = start.elapsed().as_millis(),
        "load complete"
    );

    Ok(LoadedDataset {
        directory: dir.to_path_buf(),
        frame,
        diagnostics,
        sources,
    })
}

fn process_file(path: &Path, options: &LoadOptions) -> Result<CleanedFrame> {
    let raw = read_quiz_csv(path, options.skip_rows)?;
    Ok(clean_frame(raw, path, options.duration_policy)?)
}

fn log_diagnostic(diagnostic: &Diagnostic) {
    let file = diagnostic.file_name();
    let column = diagnostic.column.as_deref().unwrap_or("-");
    match diagnostic.severity {
        Severity::Warning => warn!(
            kind = diagnostic.kind.as_str(),
            file = %file,
            column,
            row = diagnostic.row,
            "{}",
            diagnostic.message
        ),
        Severity::Error => error!(
            kind = diagnostic.kind.as_str(),
            file = %file,
            column,
            row = diagnostic.row,
            "{}",
            diagnostic.message
        ),
    }
}

/// Stacks frames row-wise over the union of their columns.
///
/// Columns keep the order of first appearance; a frame lacking a column gets
/// nulls of that column's type. No frames gives an empty frame.
pub fn concat_frames(frames: Vec<DataFrame>) -> Result<DataFrame> {
    let mut schema: Vec<(PlSmallStr, DataType)> = Vec::new();
    for frame in &frames {
        for column in frame.get_columns() {
            if !schema.iter().any(|(name, _)| name == column.name()) {
                schema.push((column.name().clone(), column.dtype().clone()));
            }
        }
    }

    let mut combined: Option<DataFrame> = None;
    for frame in &frames {
        let aligned = align_to_schema(frame, &schema)?;
        match combined.as_mut() {
            Some(acc) => {
                acc.vstack_mut(&aligned)?;
            }
            None => combined = Some(aligned),
        }
    }
    Ok(combined.unwrap_or_else(DataFrame::empty))
}

fn align_to_schema(frame: &DataFrame, schema: &[(PlSmallStr, DataType)]) -> Result<DataFrame> {
    let height = frame.height();
    let mut columns = Vec::with_capacity(schema.len());
    for (name, dtype) in schema {
        let column = match frame.column(name.as_str()) {
            Ok(existing) if existing.dtype() == dtype => existing.clone(),
            Ok(existing) => existing.cast(dtype)?,
            Err(_) => Column::full_null(name.clone(), height, dtype),
        };
        columns.push(column);
    }
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame(columns: Vec<(&str, Vec<Option<f64>>)>) -> DataFrame {
        DataFrame::new(
            columns
                .into_iter()
                .map(|(name, values)| Series::new(name.into(), values).into_column())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_concat_unions_columns_in_first_appearance_order() {
        let a = frame(vec![("x", vec![Some(1.0)]), ("y", vec![Some(2.0)])]);
        let b = frame(vec![("z", vec![Some(3.0), None]), ("x", vec![Some(4.0), Some(5.0)])]);

        let combined = concat_frames(vec![a, b]).unwrap();
        let names: Vec<&str> = combined
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, vec!["x", "y", "z"]);
        assert_eq!(combined.height(), 3);
        assert_eq!(combined.column("y").unwrap().null_count(), 2);
        assert_eq!(combined.column("z").unwrap().null_count(), 2);
        assert_eq!(combined.column("z").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_concat_nothing_is_empty() {
        let combined = concat_frames(Vec::new()).unwrap();
        assert_eq!(combined.height(), 0);
        assert_eq!(combined.width(), 0);
    }
}
