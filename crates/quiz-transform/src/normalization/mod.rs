//! Field normalizers for quiz export cells.
//!
//! Each normalizer turns one raw string into a typed value and never touches
//! the surrounding table or any reporting surface:
//! - **numeric**: comma-decimal percentages to `f64`
//! - **duration**: elapsed-time phrases to whole hours
//! - **datetime**: compound weekday/date strings to `NaiveDate`

pub mod datetime;
pub mod duration;
pub mod numeric;

pub use datetime::{DATE_FORMAT, DateParseError, parse_compound_date};
pub use duration::{DurationParseError, normalize_duration, parse_duration_hours};
pub use numeric::{normalize_percentage, parse_percentage};
