use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::models::Summary;
use crate::reports::{write_report, ReportError};
use crate::types::{NetworkCode, TargetMonth};

#[derive(Debug, Serialize)]
struct SummaryDocument<'a> {
    month: String,
    generated_at: String,
    total_transactions: usize,
    #[serde(with = "rust_decimal::serde::float")]
    total_amount_brl: Decimal,
    by_status: &'a BTreeMap<String, usize>,
    by_category: &'a BTreeMap<String, usize>,
    by_network: &'a BTreeMap<NetworkCode, usize>,
    chargebacks: usize,
    warnings: &'a [String]
}

/// Renders the summary JSON document.
pub struct JsonReporter {
    generated_at: Option<DateTime<Utc>>
}

impl JsonReporter {
    pub fn new() -> Self {
        Self { generated_at: None }
    }

    /// Pins the `generated_at` field instead of reading the clock.
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn generate(&self, summary: &Summary, month: TargetMonth, path: &Path) -> Result<PathBuf, ReportError> {
        let document = self.render(summary, month)?;
        let path = write_report(path, &document)?;

        info!("Wrote JSON summary to {}", path.display());

        Ok(path)
    }

    pub fn render(&self, summary: &Summary, month: TargetMonth) -> Result<String, ReportError> {
        let generated_at = self.generated_at.unwrap_or_else(Utc::now);

        let document = SummaryDocument {
            month: month.to_string(),
            generated_at: generated_at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            total_transactions: summary.total_count,
            total_amount_brl: summary.total_amount,
            by_status: &summary.counts_by_status,
            by_category: &summary.counts_by_category,
            by_network: &summary.counts_by_network,
            chargebacks: summary.chargeback_count,
            warnings: &summary.warnings
        };

        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}
