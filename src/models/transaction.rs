use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::types::{NetworkCode, TransactionCode};

/// A single data row from the input CSV, before any normalization.
///
/// Every field is kept as text. Empty cells are `None`, the same as a null cell in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based position of the row in the file, header excluded.
    pub row: usize,
    pub transaction_code: Option<String>,
    pub status: Option<String>,
    pub timestamp: Option<String>,
    pub amount: Option<String>,
    pub network: Option<String>,
    pub category: Option<String>,
    pub merchant_id: Option<String>
}

impl RawRow {
    pub fn code(&self) -> &str {
        self.transaction_code.as_deref().unwrap_or_default()
    }
}

/// A validated, normalized transaction that belongs to the target month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Unique within a processed set.
    pub code: TransactionCode,
    /// Lowercase.
    pub status: String,
    pub timestamp: NaiveDateTime,
    /// BRL.
    pub amount: Decimal,
    pub network: NetworkCode,
    /// Uppercase.
    pub category: String,
    /// Digits only, or empty.
    pub merchant_id: String
}

impl TransactionRecord {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
