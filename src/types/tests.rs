use super::{format_brl, format_fixed, parse_amount, MonetaryError, TargetMonth, TargetMonthError};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

#[test]
fn test_amount_parses_comma_and_point_decimals() -> Result<()> {
    let test_cases = vec![
        ("10.50", "10.50"),
        ("10,50", "10.50"),
        ("\"123,45\"", "123.45"),
        ("  99  ", "99"),
        ("-5,5", "-5.5"),
        ("0", "0"),
        ("1e3", "1000"),
    ];

    for (input_string, expected_output) in test_cases {
        assert_eq!(parse_amount(input_string)?, Decimal::from_str(expected_output)?);
    }

    Ok(())
}

#[test]
fn test_amount_does_not_understand_thousands_separators() {
    // "1.234,56" becomes "1.234.56" once the comma is swapped, which is not a number.
    assert!(matches!(parse_amount("\"1.234,56\""), Err(MonetaryError::InvalidFormat(_))));
    assert!(matches!(parse_amount("1,234.56"), Err(MonetaryError::InvalidFormat(_))));
}

#[test]
fn test_amount_rejects_empty_and_non_finite_values() {
    assert!(matches!(parse_amount(""), Err(MonetaryError::InvalidFormat(_))));
    assert!(matches!(parse_amount("\"\""), Err(MonetaryError::InvalidFormat(_))));
    assert!(matches!(parse_amount("abc"), Err(MonetaryError::InvalidFormat(_))));
    assert!(matches!(parse_amount("NaN"), Err(MonetaryError::NotFinite)));
    assert!(matches!(parse_amount("inf"), Err(MonetaryError::NotFinite)));
}

#[test]
fn test_fixed_format_uses_two_decimal_places() -> Result<()> {
    assert_eq!(format_fixed(Decimal::from_str("10")?), "10.00");
    assert_eq!(format_fixed(Decimal::from_str("10.5")?), "10.50");
    assert_eq!(format_fixed(Decimal::from_str("10.005")?), "10.01");
    assert_eq!(format_fixed(Decimal::from_str("-3.14159")?), "-3.14");

    Ok(())
}

#[test]
fn test_brl_format_groups_thousands() -> Result<()> {
    assert_eq!(format_brl(Decimal::from_str("0")?), "R$ 0.00");
    assert_eq!(format_brl(Decimal::from_str("999.9")?), "R$ 999.90");
    assert_eq!(format_brl(Decimal::from_str("1234.56")?), "R$ 1,234.56");
    assert_eq!(format_brl(Decimal::from_str("1234567.891")?), "R$ 1,234,567.89");
    assert_eq!(format_brl(Decimal::from_str("-100000")?), "R$ -100,000.00");

    Ok(())
}

#[test]
fn test_target_month_parses_and_displays() -> Result<()> {
    let month = TargetMonth::from_str("2023-08")?;

    assert_eq!(month.to_string(), "2023-08");
    assert_eq!(month.compact(), "202308");

    Ok(())
}

#[test]
fn test_target_month_rejects_malformed_values() {
    for value in ["2023-8", "23-08", "2023/08", "2023-08-01", "", "abcd-ef", " 2023-08", "2023-+8"] {
        assert_eq!(
            TargetMonth::from_str(value),
            Err(TargetMonthError::InvalidFormat(value.to_string())),
            "{value} should be rejected"
        );
    }

    assert_eq!(TargetMonth::from_str("2023-13"), Err(TargetMonthError::MonthOutOfRange("2023-13".to_string())));
    assert_eq!(TargetMonth::from_str("2023-00"), Err(TargetMonthError::MonthOutOfRange("2023-00".to_string())));
}

#[test]
fn test_target_month_contains_only_its_own_days() -> Result<()> {
    let month = TargetMonth::from_str("2023-08")?;
    let inside = NaiveDate::from_ymd_opt(2023, 8, 31).and_then(|date| date.and_hms_opt(23, 59, 59));
    let before = NaiveDate::from_ymd_opt(2023, 7, 31).and_then(|date| date.and_hms_opt(23, 59, 59));
    let other_year = NaiveDate::from_ymd_opt(2022, 8, 15).and_then(|date| date.and_hms_opt(0, 0, 0));

    assert!(inside.is_some_and(|timestamp| month.contains(&timestamp)));
    assert!(before.is_some_and(|timestamp| !month.contains(&timestamp)));
    assert!(other_year.is_some_and(|timestamp| !month.contains(&timestamp)));

    Ok(())
}
