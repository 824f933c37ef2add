use crate::types::errors::MonetaryError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

const DECIMAL_PLACES: u32 = 2;
const NON_FINITE: [&str; 4] = ["nan", "inf", "-inf", "infinity"];

/// Parses a BRL amount as it appears in the source CSV.
///
/// Quote characters are stripped and every comma becomes a decimal point. Thousands separators are
/// not recognised, so `1.234,56` turns into `1.234.56` and is rejected.
pub fn parse_amount(raw: &str) -> Result<Decimal, MonetaryError> {
    let cleaned = raw.replace('"', "").replace(',', ".");
    let value = cleaned.trim();

    if value.is_empty() {
        return Err(MonetaryError::InvalidFormat("Value is an empty string".to_string()));
    }

    if NON_FINITE.contains(&value.to_ascii_lowercase().as_str()) {
        return Err(MonetaryError::NotFinite);
    }

    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|error| MonetaryError::InvalidFormat(format!("'{value}' is not a number: {error}")))
}

/// Renders an amount with exactly two decimal places, rounding half away from zero.
pub fn format_fixed(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Renders an amount the way the notification body shows it, e.g. `R$ 1,234.56`.
pub fn format_brl(amount: Decimal) -> String {
    let fixed = format_fixed(amount);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str())
    };
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("R$ {sign}{grouped}.{fraction}")
}
