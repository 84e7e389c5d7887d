use std::path::PathBuf;

use quiz_ingest::LoadedDataset;

#[derive(Debug)]
pub struct RenderResult {
    pub dataset: LoadedDataset,
    pub output: PathBuf,
    pub diagnostics_json: Option<PathBuf>,
}

impl RenderResult {
    /// Whether the run should exit non-zero: nothing to plot, or any error
    /// diagnostic.
    pub fn has_errors(&self) -> bool {
        self.dataset.is_empty() || self.dataset.has_errors()
    }
}
