use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum SourceStatus {
    Loaded,
    Failed(String),
}

/// Outcome of processing one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    pub path: PathBuf,
    /// Rows contributed to the combined dataset (0 when failed).
    pub rows: usize,
    #[serde(flatten)]
    pub status: SourceStatus,
}

impl SourceSummary {
    pub fn loaded(path: PathBuf, rows: usize) -> Self {
        Self {
            path,
            rows,
            status: SourceStatus::Loaded,
        }
    }

    pub fn failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            rows: 0,
            status: SourceStatus::Failed(reason.into()),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.status, SourceStatus::Loaded)
    }
}
