//! Error types for record cleaning.

use thiserror::Error;

use crate::normalization::DurationParseError;

/// Errors that abort cleaning of a whole file.
#[derive(Debug, Error)]
pub enum CleanError {
    /// An elapsed-time cell could not be read and the policy rejects the file.
    #[error("invalid duration in column '{column}', data row {row_number}: {source}", row_number = .row + 1)]
    Duration {
        column: String,
        /// Zero-based data row.
        row: usize,
        #[source]
        source: DurationParseError,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for CleanError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, CleanError>;
