//! CSV reading.

mod reader;

pub use reader::{RawTable, read_quiz_csv, read_raw_table};
