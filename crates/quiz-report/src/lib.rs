//! Quiz dashboard report generation.
//!
//! - **histogram**: equal-width binning and a count-scaled density curve
//! - **figure**: the mean, median and standard deviation charts
//! - **dashboard**: the self-contained HTML page with inline SVG charts

mod common;
mod dashboard;
mod figure;
mod histogram;
mod options;
mod svg;

pub use dashboard::{EMPTY_STATE_MESSAGE, TABLE_CAPTION, render_dashboard, write_dashboard};
pub use figure::{FIGURES, FREQUENCY_LABEL, Figure, FigureSpec, build_figures};
pub use histogram::{DensityCurve, Histogram};
pub use options::{DEFAULT_BINS, DEFAULT_DENSITY_POINTS, DEFAULT_TITLE, ReportOptions};
