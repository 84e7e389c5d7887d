//! CSV reading for quiz exports.
//!
//! Exports start with a title/metadata line, then the header row, then one
//! record per quiz. Every cell is kept as a nullable string; typing happens in
//! the cleaner.
//!
//! Metadata lines are skipped as physical lines, before the csv reader sees
//! the file, so a blank or oddly quoted title line cannot shift the header.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Raw header and data rows, before conversion to a DataFrame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    /// Rows padded or truncated to the header width; empty cells are `None`.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// All-string DataFrame with one column per header.
    pub fn into_frame(self) -> Result<DataFrame> {
        let RawTable { headers, rows } = self;
        let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
        for (idx, name) in headers.iter().enumerate() {
            let values: Vec<Option<String>> = rows.iter().map(|row| row[idx].clone()).collect();
            columns.push(Series::new(name.as_str().into(), values).into_column());
        }
        Ok(DataFrame::new(columns)?)
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_error(path: &Path, err: &csv::Error) -> IngestError {
    let message = match err.position() {
        Some(position) => format!("line {}: {err}", position.line()),
        None => err.to_string(),
    };
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message,
    }
}

fn io_error(path: &Path, err: &std::io::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Reads header and rows, skipping `skip_rows` physical lines before the
/// header.
pub fn read_raw_table(path: &Path, skip_rows: usize) -> Result<RawTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| io_error(path, &e))?;
    let mut input = BufReader::new(file);
    let mut skipped = Vec::new();
    for _ in 0..skip_rows {
        skipped.clear();
        let read = input
            .read_until(b'\n', &mut skipped)
            .map_err(|e| io_error(path, &e))?;
        if read == 0 {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut records = reader.records();

    let header_record: StringRecord = match records.next() {
        Some(record) => record.map_err(|e| parse_error(path, &e))?,
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };
    let headers = build_headers(path, &header_record)?;

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| parse_error(path, &e))?;
        let mut row: Vec<Option<String>> = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).and_then(normalize_cell));
        }
        if row.iter().all(Option::is_none) {
            continue;
        }
        rows.push(row);
    }

    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read csv table"
    );
    Ok(RawTable { headers, rows })
}

fn build_headers(path: &Path, record: &StringRecord) -> Result<Vec<String>> {
    let raw: Vec<String> = record.iter().map(normalize_header).collect();
    if raw.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }
    let mut seen = BTreeSet::new();
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("column_{}", idx + 1)
        } else {
            name
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        if name != base {
            debug!(
                path = %path.display(),
                column = %base,
                renamed = %name,
                "duplicate header renamed"
            );
        }
        seen.insert(name.clone());
        headers.push(name);
    }
    Ok(headers)
}

/// Reads a quiz export into an all-string DataFrame.
///
/// `skip_rows` physical lines (the export's title line, normally 1) are dropped
/// before the header row. Header names are trimmed.
pub fn read_quiz_csv(path: &Path, skip_rows: usize) -> Result<DataFrame> {
    read_raw_table(path, skip_rows)?.into_frame()
}
