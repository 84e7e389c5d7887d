//! Quiz export ingestion.
//!
//! Discovers the CSV exports in a directory, reads each one into an
//! all-string `DataFrame`, hands it to the cleaner and stacks the results.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use quiz_ingest::load_dataset;
//! use quiz_model::LoadOptions;
//!
//! let dataset = load_dataset(Path::new("csv"), &LoadOptions::default())?;
//! for diagnostic in &dataset.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

mod csv;
mod discovery;
mod error;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{RawTable, read_quiz_csv, read_raw_table};

// === File Discovery ===
pub use discovery::list_csv_files;

// === Dataset Assembly ===
pub use loader::{LoadedDataset, concat_frames, load_dataset};
