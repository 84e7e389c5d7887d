//! Percentage and decimal parsing for locale-formatted scores.
//!
//! Quiz exports write scores like `"85,50%"` or `"7,3"`: comma decimal
//! separator, optional trailing percent sign.

/// Parse a comma-decimal string, with or without a percent sign, as f64.
///
/// Returns None for empty strings, placeholders such as `"-"`, and anything
/// else that does not read as a number once `%` is dropped and `,` becomes `.`.
///
/// ```
/// use quiz_transform::normalization::parse_percentage;
///
/// assert_eq!(parse_percentage("85,50%"), Some(85.5));
/// assert_eq!(parse_percentage("-"), None);
/// ```
pub fn parse_percentage(value: &str) -> Option<f64> {
    let cleaned = value.replace('%', "").replace(',', ".");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Missing-aware wrapper around [`parse_percentage`].
pub fn normalize_percentage(value: Option<&str>) -> Option<f64> {
    value.and_then(parse_percentage)
}
