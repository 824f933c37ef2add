use std::collections::HashSet;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{ProcessedReport, ProcessingError, RawRow, Summary, TransactionRecord, CHARGEBACK_STATUS};
use crate::normalizer::fields::{normalize_category, normalize_merchant_id, normalize_network, normalize_status};
use crate::normalizer::timestamp::parse_timestamp;
use crate::types::{parse_amount, TargetMonth};

/// A row that survived date parsing and the month filter and has its text fields normalized.
/// The network stays raw until materialization so that dropped duplicates cannot abort a run.
struct NormalizedRow {
    row: usize,
    code: String,
    status: String,
    timestamp: NaiveDateTime,
    amount: Decimal,
    network: Option<String>,
    category: String,
    merchant_id: String
}

impl NormalizedRow {
    fn from_raw(raw: RawRow, timestamp: NaiveDateTime) -> Result<Self, ProcessingError> {
        let amount = parse_amount(raw.amount.as_deref().unwrap_or_default())
            .map_err(|error| ProcessingError::invalid_amount(&raw, error))?;

        Ok(Self {
            row: raw.row,
            category: normalize_category(raw.category.as_deref()),
            merchant_id: normalize_merchant_id(raw.merchant_id.as_deref()),
            status: normalize_status(raw.status.as_deref()),
            code: raw.transaction_code.unwrap_or_default(),
            network: raw.network,
            timestamp,
            amount
        })
    }

    fn into_record(self) -> Result<TransactionRecord, ProcessingError> {
        let network = normalize_network(self.network.as_deref())
            .ok_or_else(|| ProcessingError::invalid_network(self.row, &self.code, self.network.as_deref()))?;

        Ok(TransactionRecord {
            code: self.code,
            status: self.status,
            timestamp: self.timestamp,
            amount: self.amount,
            network,
            category: self.category,
            merchant_id: self.merchant_id
        })
    }
}

/// Turns raw CSV rows into the normalized record set for `month` and its summary.
///
/// Stages run in a fixed order: timestamp parsing, month filter, field normalization,
/// deduplication by transaction code (first occurrence wins), chargeback detection and finally
/// materialization. Unparsable dates and duplicate codes drop rows and add a warning; a bad amount
/// or network aborts the run.
///
/// # Errors
/// Returns `ProcessingError` if:
/// - An amount in the target month cannot be parsed.
/// - A surviving row has a network that is not an integer.
pub fn process(rows: Vec<RawRow>, month: TargetMonth) -> Result<ProcessedReport, ProcessingError> {
    let mut warnings = Vec::new();
    let rows_in = rows.len();

    let mut dated = Vec::with_capacity(rows_in);
    let mut invalid_dates = 0usize;

    for raw in rows {
        match raw.timestamp.as_deref().and_then(parse_timestamp) {
            Some(timestamp) => dated.push((raw, timestamp)),
            None => {
                debug!("Row [{}] has an invalid timestamp {:?}", raw.row, raw.timestamp);
                invalid_dates += 1;
            }
        }
    }

    if invalid_dates > 0 {
        warn!("Removed {invalid_dates} rows with invalid dates");
        warnings.push(format!("Removed {invalid_dates} rows with invalid dates"));
    }

    let normalized = dated
        .into_iter()
        .filter(|(_, timestamp)| month.contains(timestamp))
        .map(|(raw, timestamp)| NormalizedRow::from_raw(raw, timestamp))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("{} of {rows_in} rows fall in {month}", normalized.len());

    let in_month = normalized.len();
    let mut seen = HashSet::with_capacity(in_month);
    let mut unique = Vec::with_capacity(in_month);

    for row in normalized {
        if seen.contains(&row.code) {
            debug!("Row [{}] repeats transaction [{}]", row.row, row.code);
            continue;
        }

        seen.insert(row.code.clone());
        unique.push(row);
    }

    let duplicates = in_month - unique.len();

    if duplicates > 0 {
        warn!("Removed {duplicates} duplicate transactions");
        warnings.push(format!("Removed {duplicates} duplicate transactions"));
    }

    let chargebacks = unique.iter().filter(|row| row.status == CHARGEBACK_STATUS).count();

    if chargebacks > 0 {
        warn!("Found {chargebacks} chargeback(s)");
        warnings.push(format!("Found {chargebacks} chargeback(s)"));
    }

    let records = unique
        .into_iter()
        .map(NormalizedRow::into_record)
        .collect::<Result<Vec<_>, _>>()?;

    let summary = Summary::from_records(&records, warnings);

    debug!("Kept {} records totalling {}", summary.total_count, summary.total_amount);

    Ok(ProcessedReport { records, summary })
}
