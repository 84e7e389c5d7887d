//! CLI library components for the quiz dashboard.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
