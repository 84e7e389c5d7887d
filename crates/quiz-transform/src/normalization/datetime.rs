//! Compound open-date parsing.
//!
//! The open-date column holds a weekday and a date separated by commas,
//! optionally followed by a time: `"quarta-feira, 3 jan. 2024, 14:00"`.
//! Only the segment after the first comma is a date, written as day,
//! abbreviated month with a trailing period, and four-digit year.

use chrono::NaiveDate;
use thiserror::Error;

/// chrono format for the date segment once the month is in English.
pub const DATE_FORMAT: &str = "%d %b. %Y";

/// Portuguese month abbreviations mapped to chrono's English ones.
const PORTUGUESE_MONTHS: [(&str, &str); 12] = [
    ("jan", "Jan"),
    ("fev", "Feb"),
    ("mar", "Mar"),
    ("abr", "Apr"),
    ("mai", "May"),
    ("jun", "Jun"),
    ("jul", "Jul"),
    ("ago", "Aug"),
    ("set", "Sep"),
    ("out", "Oct"),
    ("nov", "Nov"),
    ("dez", "Dec"),
];

const ENGLISH_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("no comma separating weekday and date in '{value}'")]
    MissingComma { value: String },

    #[error("expected \"<day> <month>. <year>\" after the comma, found {found} tokens in '{value}'")]
    WrongShape { value: String, found: usize },

    #[error("unknown month abbreviation '{token}' in '{value}'")]
    UnknownMonth { value: String, token: String },

    #[error("'{value}' does not match \"<day> <month>. <year>\": {source}")]
    Format {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Extract the calendar date from a compound weekday/date string.
///
/// ```
/// use chrono::NaiveDate;
/// use quiz_transform::normalization::parse_compound_date;
///
/// assert_eq!(
///     parse_compound_date("quarta-feira, 3 jan. 2024"),
///     Ok(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap())
/// );
/// assert!(parse_compound_date("garbage").is_err());
/// ```
pub fn parse_compound_date(value: &str) -> Result<NaiveDate, DateParseError> {
    let segment = value
        .split(',')
        .nth(1)
        .ok_or_else(|| DateParseError::MissingComma {
            value: value.to_string(),
        })?
        .trim();

    let tokens: Vec<&str> = segment.split_whitespace().collect();
    let [day, month, year] = tokens.as_slice() else {
        return Err(DateParseError::WrongShape {
            value: value.to_string(),
            found: tokens.len(),
        });
    };

    let (name, period) = match month.strip_suffix('.') {
        Some(name) => (name, "."),
        None => (*month, ""),
    };
    let english = english_month(name).ok_or_else(|| DateParseError::UnknownMonth {
        value: value.to_string(),
        token: (*month).to_string(),
    })?;

    let rebuilt = format!("{day} {english}{period} {year}");
    NaiveDate::parse_from_str(&rebuilt, DATE_FORMAT).map_err(|source| DateParseError::Format {
        value: value.to_string(),
        source,
    })
}

/// Resolve a Portuguese or English month abbreviation, case-insensitively.
fn english_month(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    PORTUGUESE_MONTHS
        .iter()
        .find(|(pt, _)| *pt == lower)
        .map(|(_, en)| *en)
        .or_else(|| {
            ENGLISH_MONTHS
                .iter()
                .find(|en| en.eq_ignore_ascii_case(&lower))
                .copied()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_portuguese_dates() {
        assert_eq!(parse_compound_date("quarta-feira, 3 jan. 2024"), Ok(date(2024, 1, 3)));
        assert_eq!(parse_compound_date("sábado, 17 fev. 2024"), Ok(date(2024, 2, 17)));
        assert_eq!(parse_compound_date("domingo, 1 SET. 2024"), Ok(date(2024, 9, 1)));
        assert_eq!(parse_compound_date("terça-feira, 31 dez. 2024"), Ok(date(2024, 12, 31)));
    }

    #[test]
    fn test_english_abbreviations() {
        assert_eq!(parse_compound_date("Friday, 09 Aug. 2024"), Ok(date(2024, 8, 9)));
    }

    #[test]
    fn test_trailing_time_segment_is_ignored() {
        assert_eq!(
            parse_compound_date("segunda-feira, 4 mar. 2024, 08:00"),
            Ok(date(2024, 3, 4))
        );
    }

    #[test]
    fn test_missing_comma() {
        assert_eq!(
            parse_compound_date("garbage"),
            Err(DateParseError::MissingComma {
                value: "garbage".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_shape() {
        assert!(matches!(
            parse_compound_date("quarta-feira, 3 jan."),
            Err(DateParseError::WrongShape { found: 2, .. })
        ));
        assert!(matches!(
            parse_compound_date("quarta-feira,"),
            Err(DateParseError::WrongShape { found: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_month() {
        assert!(matches!(
            parse_compound_date("quarta-feira, 3 xyz. 2024"),
            Err(DateParseError::UnknownMonth { .. })
        ));
    }

    #[test]
    fn test_format_errors() {
        // Period after the month is part of the format.
        assert!(matches!(
            parse_compound_date("quarta-feira, 3 jan 2024"),
            Err(DateParseError::Format { .. })
        ));
        assert!(matches!(
            parse_compound_date("quinta-feira, 30 fev. 2024"),
            Err(DateParseError::Format { .. })
        ));
        assert!(matches!(
            parse_compound_date("quinta-feira, xx fev. 2024"),
            Err(DateParseError::Format { .. })
        ));
    }
}
