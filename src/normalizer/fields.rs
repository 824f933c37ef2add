use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::types::NetworkCode;

const ROOT_LENGTH: usize = 8;
const BRANCH_SUFFIX: &str = "0001";
const CHECK_DIGITS_PLACEHOLDER: &str = "00";
const CANONICAL_LENGTH: usize = 14;

pub fn normalize_category(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_uppercase()
}

pub fn normalize_status(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_lowercase()
}

/// Reduces a merchant tax identifier to its digits and pads partial forms.
///
/// - 7 to 9 digits: a root identifier, right-padded with `0` to 8 digits and followed by the
///   `0001` branch and `00` check digits. A 9 digit root is not cut, so it ends up 15 long.
/// - 11 digits: `00` is appended, giving 13 digits.
/// - more than 14 digits: cut to the first 14.
/// - anything else, including no digits at all, is returned as is.
pub fn normalize_merchant_id(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        7..=9 => format!("{digits:0<ROOT_LENGTH$}{BRANCH_SUFFIX}{CHECK_DIGITS_PLACEHOLDER}"),
        11 => format!("{digits}{CHECK_DIGITS_PLACEHOLDER}"),
        length if length > CANONICAL_LENGTH => digits[..CANONICAL_LENGTH].to_string(),
        _ => digits
    }
}

/// Coerces a network cell to an integer.
///
/// Whole numbers written with a zero fraction (`3.0`) are accepted; anything with a real
/// fractional part or non-numeric text is not.
pub fn normalize_network(raw: Option<&str>) -> Option<NetworkCode> {
    let value = raw?.trim();

    if let Ok(network) = value.parse::<NetworkCode>() {
        return Some(network);
    }

    let decimal = Decimal::from_str(value).ok()?;

    if decimal.fract().is_zero() {
        decimal.to_i64()
    } else {
        None
    }
}
