//! Configuration options for loading quiz exports.

use serde::{Deserialize, Serialize};

/// What the cleaner does with an elapsed-time cell it cannot read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DurationPolicy {
    /// Abort the file; it is reported and left out of the dataset.
    #[default]
    RejectFile,
    /// Store a null for the cell and report it; the file is kept.
    NullCell,
}

/// Options for loading a directory of exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Physical records skipped before the header row.
    pub skip_rows: usize,
    pub duration_policy: DurationPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            skip_rows: 1,
            duration_policy: DurationPolicy::default(),
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    #[must_use]
    pub fn with_duration_policy(mut self, policy: DurationPolicy) -> Self {
        self.duration_policy = policy;
        self
    }
}
