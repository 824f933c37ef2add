mod errors;
mod monetary;
mod target_month;
#[cfg(test)]
mod tests;

pub use errors::{MonetaryError, TargetMonthError};
pub use monetary::{format_brl, format_fixed, parse_amount};
pub use target_month::TargetMonth;

pub type TransactionCode = String;
pub type NetworkCode = i64;
