use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{TransactionRecord, CHARGEBACK_STATUS};
use crate::types::NetworkCode;

/// Aggregate statistics derived from a processed record set.
///
/// Count maps are ordered by key so that two runs over the same input produce identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_count: usize,
    pub total_amount: Decimal,
    pub counts_by_status: BTreeMap<String, usize>,
    pub counts_by_category: BTreeMap<String, usize>,
    pub counts_by_network: BTreeMap<NetworkCode, usize>,
    pub chargeback_count: usize,
    /// Data-quality notes in the order they were raised.
    pub warnings: Vec<String>
}

impl Summary {
    pub fn from_records(records: &[TransactionRecord], warnings: Vec<String>) -> Self {
        let mut summary = Summary {
            warnings,
            ..Summary::default()
        };

        for record in records {
            summary.total_count += 1;
            summary.total_amount += record.amount;

            *summary.counts_by_status.entry(record.status.clone()).or_default() += 1;
            *summary.counts_by_category.entry(record.category.clone()).or_default() += 1;
            *summary.counts_by_network.entry(record.network).or_default() += 1;

            if record.status == CHARGEBACK_STATUS {
                summary.chargeback_count += 1;
            }
        }

        summary
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}
