//! Elapsed-time phrases to whole hours.
//!
//! Exports describe how long a quiz stayed open as a four-token phrase:
//! `"<days> <day-unit> <hours> <hour-unit>"`, e.g. `"2 dias, 5 horas"`.
//! The numbers are read by position; the unit words are only checked to be
//! words, never interpreted, so any language's wording is accepted as long as
//! the shape holds.

use thiserror::Error;

/// Why an elapsed-time phrase could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationParseError {
    #[error("expected \"<days> <unit> <hours> <unit>\", found {found} tokens in '{value}'")]
    WrongTokenCount { value: String, found: usize },

    #[error("invalid {part} count '{token}' in '{value}'")]
    InvalidNumber {
        value: String,
        part: &'static str,
        token: String,
    },

    #[error("invalid unit word '{token}' in '{value}'")]
    InvalidUnit { value: String, token: String },
}

/// Parse a phrase such as `"2 dias, 5 horas"` into `days * 24 + hours`.
pub fn parse_duration_hours(value: &str) -> Result<i64, DurationParseError> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let [days, day_unit, hours, hour_unit] = tokens.as_slice() else {
        return Err(DurationParseError::WrongTokenCount {
            value: value.to_string(),
            found: tokens.len(),
        });
    };

    let days = parse_count(value, "day", days)?;
    check_unit(value, day_unit)?;
    let hours = parse_count(value, "hour", hours)?;
    check_unit(value, hour_unit)?;

    Ok(i64::from(days) * 24 + i64::from(hours))
}

/// Missing-aware wrapper: missing or blank input is `Ok(None)`.
pub fn normalize_duration(value: Option<&str>) -> Result<Option<i64>, DurationParseError> {
    match value {
        Some(text) if !text.trim().is_empty() => parse_duration_hours(text).map(Some),
        _ => Ok(None),
    }
}

fn parse_count(value: &str, part: &'static str, token: &str) -> Result<u32, DurationParseError> {
    let invalid = || DurationParseError::InvalidNumber {
        value: value.to_string(),
        part,
        token: token.to_string(),
    };
    if token.is_empty() || !token.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse::<u32>().map_err(|_| invalid())
}

fn check_unit(value: &str, token: &str) -> Result<(), DurationParseError> {
    let word = token
        .strip_suffix(',')
        .or_else(|| token.strip_suffix('.'))
        .unwrap_or(token);
    if !word.is_empty() && word.chars().all(char::is_alphabetic) {
        Ok(())
    } else {
        Err(DurationParseError::InvalidUnit {
            value: value.to_string(),
            token: token.to_string(),
        })
    }
}
