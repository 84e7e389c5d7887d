//! CLI argument definitions for the quiz dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use quiz_model::DurationPolicy;
use quiz_report::DEFAULT_BINS;

#[derive(Parser)]
#[command(
    name = "quiz-dashboard",
    version,
    about = "Quiz score dashboard - Combine quiz exports and plot score distributions",
    long_about = "Combine a directory of quiz-export CSV files into one dataset.\n\n\
                  Normalizes comma-decimal percentages, elapsed-time phrases and\n\
                  localized open dates, then renders an HTML dashboard with\n\
                  histograms of the first-attempt mean, median and standard deviation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load every CSV export in a directory and write the dashboard.
    Render(RenderArgs),

    /// List the columns the cleaner recognizes.
    Columns,
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Directory containing the quiz-export CSV files.
    #[arg(value_name = "CSV_DIR", default_value = "csv")]
    pub csv_dir: PathBuf,

    /// Path of the generated HTML page.
    #[arg(
        long = "output",
        short = 'o',
        value_name = "PATH",
        default_value = "quiz-dashboard.html"
    )]
    pub output: PathBuf,

    /// Histogram bins per chart (0 is treated as 1).
    #[arg(long = "bins", value_name = "N", default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// What to do with an elapsed-time cell that cannot be read.
    ///
    /// `reject-file` leaves the whole file out of the dataset; `null-cell`
    /// keeps the file and stores an empty value for the cell.
    #[arg(long = "duration-policy", value_enum, default_value = "reject-file")]
    pub duration_policy: DurationPolicyArg,

    /// Records skipped before the header row of each file.
    #[arg(long = "skip-rows", value_name = "N", default_value_t = 1)]
    pub skip_rows: usize,

    /// Also write sources and diagnostics as JSON.
    #[arg(long = "diagnostics-json", value_name = "PATH")]
    pub diagnostics_json: Option<PathBuf>,

    /// Page title (defaults to the standard dashboard title).
    #[arg(long = "title", value_name = "TEXT")]
    pub title: Option<String>,
}

/// CLI duration policy choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DurationPolicyArg {
    RejectFile,
    NullCell,
}

impl From<DurationPolicyArg> for DurationPolicy {
    fn from(arg: DurationPolicyArg) -> Self {
        match arg {
            DurationPolicyArg::RejectFile => DurationPolicy::RejectFile,
            DurationPolicyArg::NullCell => DurationPolicy::NullCell,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
