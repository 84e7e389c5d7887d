//! Quiz export transformation.
//!
//! - **normalization**: pure string-to-value conversions for single cells
//! - **clean**: applies the normalizers across one file's table
//! - **frame**: DataFrame value extraction and construction helpers

pub mod clean;
pub mod error;
pub mod frame;
pub mod normalization;

pub use clean::{CleanedFrame, clean_frame};
pub use error::{CleanError, Result};
pub use normalization::{
    DateParseError, DurationParseError, normalize_duration, normalize_percentage,
    parse_compound_date, parse_duration_hours, parse_percentage,
};
