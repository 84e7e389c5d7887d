//! Shared types for the quiz dashboard workspace.

pub mod columns;
pub mod diagnostic;
pub mod options;
pub mod source;

pub use columns::{
    CatalogueEntry, ColumnRole, DATE_COLUMN, DATE_SOURCE_COLUMN, DURATION_HOURS_COLUMN,
    DURATION_SOURCE_COLUMN, StatColumn, column_catalogue,
};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity, count_by_severity, display_name};
pub use options::{DurationPolicy, LoadOptions};
pub use source::{SourceStatus, SourceSummary};
