use ksh_earnings::normalize::{parse_earnings_text, parse_earnings_value, parse_year};
use ksh_earnings::{CellValue, ParseError};

#[test]
fn year_is_leading_token_before_first_dot() {
    for y in [1998, 2008, 2019, 2024] {
        let label = format!("{y}. I–IV. negyedév");
        assert_eq!(parse_year(&label), Ok(y));
        assert_eq!(parse_year(&format!("{y}.")), Ok(y));
    }
}

#[test]
fn year_without_dot_uses_whole_label() {
    assert_eq!(parse_year("2021"), Ok(2021));
    assert!(matches!(parse_year("összesen"), Err(ParseError::InvalidYear(_))));
    assert!(parse_year("").is_err());
}

#[test]
fn year_must_have_four_digits() {
    assert!(parse_year("21. negyedév").is_err());
    assert!(parse_year("20201. I.").is_err());
    assert!(parse_year("20a1. I.").is_err());
}

#[test]
fn clean_numbers_are_idempotent() {
    for s in ["0", "1500", "403600", "12.5"] {
        let once = parse_earnings_text(s).unwrap().unwrap();
        let again = parse_earnings_text(&once.to_string()).unwrap().unwrap();
        assert_eq!(once, again);
    }
}

#[test]
fn missing_marker_is_absent() {
    assert_eq!(parse_earnings_text("..."), Ok(None));
    assert_eq!(parse_earnings_text("…"), Ok(None));
    assert_eq!(parse_earnings_text(" … "), Ok(None));
    assert_eq!(parse_earnings_value(&CellValue::Empty), Ok(None));
    assert_eq!(parse_earnings_text(""), Ok(None));
}

#[test]
fn space_grouped_thousands() {
    assert_eq!(parse_earnings_text("1 234 567"), Ok(Some(1_234_567.0)));
    assert_eq!(
        parse_earnings_value(&CellValue::Text("1 000".into())),
        Ok(Some(1000.0))
    );
}

#[test]
fn numeric_cells_pass_through() {
    assert_eq!(
        parse_earnings_value(&CellValue::Number(517_300.0)),
        Ok(Some(517_300.0))
    );
    assert!(parse_earnings_value(&CellValue::Number(f64::NAN)).is_err());
}

#[test]
fn rejects_garbage_and_negatives() {
    assert!(matches!(
        parse_earnings_text("n.a."),
        Err(ParseError::InvalidNumber(_))
    ));
    assert_eq!(parse_earnings_text("-5"), Err(ParseError::Negative(-5.0)));
    assert!(parse_earnings_text("x").is_err());
}

#[test]
fn comma_thousands_groups_are_rejected_not_shrunk() {
    for s in ["403,600", "1,234,567", "12 345,000"] {
        assert!(
            matches!(parse_earnings_text(s), Err(ParseError::InvalidNumber(_))),
            "{s} must not parse"
        );
    }
    assert_eq!(parse_earnings_text("403 600,5"), Ok(Some(403_600.5)));
    assert_eq!(parse_earnings_text("0,75"), Ok(Some(0.75)));
}

#[test]
fn unicode_spaces_group_thousands() {
    assert_eq!(parse_earnings_text("367\u{2009}800"), Ok(Some(367_800.0)));
    assert_eq!(parse_earnings_text("367\u{202f}800"), Ok(Some(367_800.0)));
    assert_eq!(parse_earnings_text("\t367\u{a0}800\t"), Ok(Some(367_800.0)));
}
