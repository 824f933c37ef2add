use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonetaryError {
    #[error("Monetary error: {0}")]
    InvalidFormat(String),
    #[error("Monetary error: Value is not finite")]
    NotFinite
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetMonthError {
    #[error("Invalid month '{0}': expected YYYY-MM")]
    InvalidFormat(String),
    #[error("Invalid month '{0}': month must be between 01 and 12")]
    MonthOutOfRange(String)
}
