use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// What went wrong, independent of where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An expected column is absent from a file.
    MissingColumn,
    /// A compound date cell did not match the expected shape.
    DateParse,
    /// An elapsed-time cell did not match the expected shape.
    DurationParse,
    /// A whole file was excluded from the dataset.
    FileProcessing,
    /// No file produced usable rows.
    EmptyDataset,
}

impl DiagnosticKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::MissingColumn => "missing column",
            DiagnosticKind::DateParse => "date parse",
            DiagnosticKind::DurationParse => "duration parse",
            DiagnosticKind::FileProcessing => "file processing",
            DiagnosticKind::EmptyDataset => "empty dataset",
        }
    }
}

/// A user-facing warning or error tied to a file, column or cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Source file, when the diagnostic concerns one.
    pub file: Option<PathBuf>,
    /// Column name (if applicable).
    pub column: Option<String>,
    /// Zero-based data row within the file (if applicable).
    pub row: Option<usize>,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    pub fn missing_column(file: &Path, column: &str) -> Self {
        Self {
            severity: Severity::Warning,
            kind: DiagnosticKind::MissingColumn,
            file: Some(file.to_path_buf()),
            column: Some(column.to_string()),
            row: None,
            message: format!(
                "Column {column} not found in the file {}.",
                display_name(file)
            ),
        }
    }

    pub fn date_parse(file: &Path, column: &str, row: usize, detail: impl fmt::Display) -> Self {
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::DateParse,
            file: Some(file.to_path_buf()),
            column: Some(column.to_string()),
            row: Some(row),
            message: format!("Error parsing date: {detail}"),
        }
    }

    pub fn duration_parse(
        file: &Path,
        column: &str,
        row: usize,
        detail: impl fmt::Display,
    ) -> Self {
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::DurationParse,
            file: Some(file.to_path_buf()),
            column: Some(column.to_string()),
            row: Some(row),
            message: format!("Error parsing duration: {detail}"),
        }
    }

    pub fn file_processing(file: &Path, detail: impl fmt::Display) -> Self {
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::FileProcessing,
            file: Some(file.to_path_buf()),
            column: None,
            row: None,
            message: format!("Error processing file {}: {detail}", display_name(file)),
        }
    }

    pub fn empty_dataset(directory: &Path, files_seen: usize) -> Self {
        let message = if files_seen == 0 {
            format!("No CSV files found in {}.", directory.display())
        } else {
            format!(
                "None of the {files_seen} CSV files in {} produced usable rows.",
                directory.display()
            )
        };
        Self {
            severity: Severity::Error,
            kind: DiagnosticKind::EmptyDataset,
            file: None,
            column: None,
            row: None,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// File name without its directory, or `-` when not file-scoped.
    pub fn file_name(&self) -> String {
        self.file
            .as_deref()
            .map(display_name)
            .unwrap_or_else(|| "-".to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.as_str(), self.message)?;
        if let Some(row) = self.row {
            write!(f, " (row {})", row + 1)?;
        }
        Ok(())
    }
}

/// Short display form of a source path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Counts diagnostics by severity.
pub fn count_by_severity(diagnostics: &[Diagnostic], severity: Severity) -> usize {
    diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.severity == severity)
        .count()
}
