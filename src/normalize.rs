//! Parsing of locale-formatted earnings cells and period labels.
//!
//! KSH tables write thousands with (non-breaking) spaces, e.g. `"1 234 567"`, mark missing
//! figures with an ellipsis, and label periods like `"2020. I–IV. negyedév"`.

use crate::error::ParseError;
use crate::models::CellValue;

/// Cleaned strings that mean "no data".
const MISSING_MARKERS: [&str; 2] = ["...", "…"];

/// Parse an earnings cell. `Ok(None)` means the cell is absent (empty or missing marker).
pub fn parse_earnings_value(raw: &CellValue) -> Result<Option<f64>, ParseError> {
    match raw {
        CellValue::Empty => Ok(None),
        CellValue::Number(v) => check_value(*v, &v.to_string()).map(Some),
        CellValue::Text(s) => parse_earnings_text(s),
    }
}

/// Text variant of [`parse_earnings_value`].
pub fn parse_earnings_text(raw: &str) -> Result<Option<f64>, ParseError> {
    // `char::is_whitespace` covers NBSP, narrow NBSP and thin space as well
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() || MISSING_MARKERS.contains(&cleaned.as_str()) {
        return Ok(None);
    }

    // Hungarian decimal comma. Exactly three digits after it reads just as well as an
    // English thousands group ("403,600"), so that shape is refused.
    let numeric = if !cleaned.contains('.') && cleaned.matches(',').count() == 1 {
        let frac = cleaned.rsplit(',').next().unwrap_or("");
        if frac.len() == 3 && frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidNumber(raw.to_string()));
        }
        cleaned.replace(',', ".")
    } else {
        cleaned
    };

    let v: f64 = numeric
        .parse()
        .map_err(|_| ParseError::InvalidNumber(raw.to_string()))?;
    check_value(v, raw).map(Some)
}

fn check_value(v: f64, raw: &str) -> Result<f64, ParseError> {
    if !v.is_finite() {
        return Err(ParseError::InvalidNumber(raw.to_string()));
    }
    if v < 0.0 {
        return Err(ParseError::Negative(v));
    }
    Ok(v)
}

/// Extract the year from a period label: the segment before the first `.`.
pub fn parse_year(period_label: &str) -> Result<i32, ParseError> {
    let head = period_label
        .split_once('.')
        .map_or(period_label, |(h, _)| h)
        .trim();
    if head.len() != 4 || !head.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidYear(period_label.to_string()));
    }
    head.parse::<i32>()
        .map_err(|_| ParseError::InvalidYear(period_label.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_and_nbsp_are_group_separators() {
        assert_eq!(parse_earnings_text("1 234 567"), Ok(Some(1_234_567.0)));
        assert_eq!(parse_earnings_text("612\u{a0}145"), Ok(Some(612_145.0)));
        assert_eq!(parse_earnings_text(" 98\u{202f}000 "), Ok(Some(98_000.0)));
    }

    #[test]
    fn decimal_comma() {
        assert_eq!(parse_earnings_text("1 234,5"), Ok(Some(1234.5)));
        assert_eq!(parse_earnings_text("98,25"), Ok(Some(98.25)));
        assert!(parse_earnings_text("1,234,5").is_err());
    }

    #[test]
    fn year_with_trailing_period_text() {
        assert_eq!(parse_year("2021. I–IV. negyedév"), Ok(2021));
        assert_eq!(parse_year(" 2019 . január"), Ok(2019));
    }
}
