//! Per-file record cleaning.
//!
//! Applies the field normalizers across one parsed export: the six statistic
//! columns are rewritten in place as `Float64`, the elapsed-time phrase is
//! derived into whole hours and the compound open date into a `Date` column.
//! Cell-level problems are collected as [`Diagnostic`]s; only an unreadable
//! duration under [`DurationPolicy::RejectFile`] aborts the file.

use std::path::Path;

use polars::prelude::{DataFrame, DataType, NamedFrom, Series};
use tracing::debug;

use quiz_model::{
    DATE_COLUMN, DATE_SOURCE_COLUMN, DURATION_HOURS_COLUMN, DURATION_SOURCE_COLUMN, Diagnostic,
    DurationPolicy, StatColumn, display_name,
};

use crate::error::{CleanError, Result};
use crate::frame::{date_series, has_column, string_values};
use crate::normalization::{normalize_duration, normalize_percentage, parse_compound_date};

/// A cleaned table plus everything worth telling the user about it.
#[derive(Debug, Clone)]
pub struct CleanedFrame {
    pub frame: DataFrame,
    pub diagnostics: Vec<Diagnostic>,
}

/// Normalize one file's raw table.
///
/// `source` only labels diagnostics; nothing is read from disk.
pub fn clean_frame(mut df: DataFrame, source: &Path, policy: DurationPolicy) -> Result<CleanedFrame> {
    let mut diagnostics = Vec::new();
    normalize_stat_columns(&mut df, source, &mut diagnostics)?;
    derive_duration_hours(&mut df, source, policy, &mut diagnostics)?;
    derive_open_date(&mut df, source, &mut diagnostics)?;
    Ok(CleanedFrame {
        frame: df,
        diagnostics,
    })
}

fn normalize_stat_columns(
    df: &mut DataFrame,
    source: &Path,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<()> {
    for stat in StatColumn::ALL {
        let name = stat.column_name();
        if !has_column(df, name) {
            diagnostics.push(Diagnostic::missing_column(source, name));
            continue;
        }
        let values: Vec<Option<f64>> = string_values(df, name)?
            .iter()
            .map(|value| normalize_percentage(value.as_deref()))
            .collect();
        debug!(
            file = %display_name(source),
            column = name,
            parsed = values.iter().flatten().count(),
            rows = values.len(),
            "normalized statistic column"
        );
        df.with_column(Series::new(name.into(), values))?;
    }
    Ok(())
}

fn derive_duration_hours(
    df: &mut DataFrame,
    source: &Path,
    policy: DurationPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<()> {
    if !has_column(df, DURATION_SOURCE_COLUMN) {
        diagnostics.push(Diagnostic::missing_column(source, DURATION_SOURCE_COLUMN));
        let nulls = Series::full_null(DURATION_HOURS_COLUMN.into(), df.height(), &DataType::Int64);
        df.with_column(nulls)?;
        return Ok(());
    }

    let raw = string_values(df, DURATION_SOURCE_COLUMN)?;
    let mut hours = Vec::with_capacity(raw.len());
    for (row, value) in raw.iter().enumerate() {
        match normalize_duration(value.as_deref()) {
            Ok(parsed) => hours.push(parsed),
            Err(source_err) => match policy {
                DurationPolicy::RejectFile => {
                    return Err(CleanError::Duration {
                        column: DURATION_SOURCE_COLUMN.to_string(),
                        row,
                        source: source_err,
                    });
                }
                DurationPolicy::NullCell => {
                    diagnostics.push(Diagnostic::duration_parse(
                        source,
                        DURATION_SOURCE_COLUMN,
                        row,
                        &source_err,
                    ));
                    hours.push(None);
                }
            },
        }
    }
    debug!(
        file = %display_name(source),
        parsed = hours.iter().flatten().count(),
        rows = hours.len(),
        "derived duration hours"
    );
    df.with_column(Series::new(DURATION_HOURS_COLUMN.into(), hours))?;
    Ok(())
}

fn derive_open_date(
    df: &mut DataFrame,
    source: &Path,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<()> {
    if !has_column(df, DATE_SOURCE_COLUMN) {
        diagnostics.push(Diagnostic::missing_column(source, DATE_SOURCE_COLUMN));
        let nulls = Series::full_null(DATE_COLUMN.into(), df.height(), &DataType::Date);
        df.with_column(nulls)?;
        return Ok(());
    }

    let raw = string_values(df, DATE_SOURCE_COLUMN)?;
    let mut dates = Vec::with_capacity(raw.len());
    for (row, value) in raw.iter().enumerate() {
        let parsed = match value.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => match parse_compound_date(text) {
                Ok(date) => Some(date),
                Err(err) => {
                    diagnostics.push(Diagnostic::date_parse(source, DATE_SOURCE_COLUMN, row, &err));
                    None
                }
            },
        };
        dates.push(parsed);
    }
    debug!(
        file = %display_name(source),
        parsed = dates.iter().flatten().count(),
        rows = dates.len(),
        "derived open date"
    );
    df.with_column(date_series(DATE_COLUMN, &dates)?)?;
    Ok(())
}
