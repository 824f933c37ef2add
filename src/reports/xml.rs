use std::fmt;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::TransactionRecord;
use crate::reports::{write_report, ReportError};
use crate::types::{format_fixed, TargetMonth};

const INDENT: &str = "    ";

/// Renders the per-transaction XML report.
pub struct XmlReporter {
    generated_at: Option<DateTime<Utc>>
}

impl XmlReporter {
    pub fn new() -> Self {
        Self { generated_at: None }
    }

    /// Pins the `generated_at` attribute instead of reading the clock.
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn generate(&self, records: &[TransactionRecord], month: TargetMonth, path: &Path) -> Result<PathBuf, ReportError> {
        let document = self.render(records, month)?;
        let path = write_report(path, &document)?;

        info!("Wrote XML report with {} transactions to {}", records.len(), path.display());

        Ok(path)
    }

    pub fn render(&self, records: &[TransactionRecord], month: TargetMonth) -> Result<String, ReportError> {
        let generated_at = self.generated_at.unwrap_or_else(Utc::now);
        let mut document = String::new();

        write_document(&mut document, records, month, generated_at)?;

        Ok(document)
    }
}

fn write_document(document: &mut String, records: &[TransactionRecord], month: TargetMonth, generated_at: DateTime<Utc>) -> fmt::Result {
    writeln!(document, "<?xml version=\"1.0\" encoding=\"utf-8\"?>")?;
    write!(
        document,
        "<TransactionsReport month=\"{}\" generated_at=\"{}\"",
        escape(&month.to_string()),
        generated_at.format("%Y-%m-%dT%H:%M:%SZ")
    )?;

    if records.is_empty() {
        return writeln!(document, "/>");
    }

    writeln!(document, ">")?;

    for record in records {
        writeln!(document, "{INDENT}<Transaction id=\"{}\">", escape(&record.code))?;
        write_element(document, "Status", &[], &record.status)?;
        write_element(document, "Date", &[], &record.date().format("%Y-%m-%d").to_string())?;
        write_element(document, "Amount", &[("currency", "BRL")], &format_fixed(record.amount))?;
        write_element(document, "Type", &[], &record.category)?;
        write_element(document, "MerchantId", &[], &record.merchant_id)?;
        write_element(document, "Network", &[], &record.network.to_string())?;
        write_element(document, "Category", &[], &record.category)?;
        writeln!(document, "{INDENT}</Transaction>")?;
    }

    writeln!(document, "</TransactionsReport>")
}

impl Default for XmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_element(document: &mut String, name: &str, attributes: &[(&str, &str)], text: &str) -> fmt::Result {
    write!(document, "{INDENT}{INDENT}<{name}")?;

    for (key, value) in attributes {
        write!(document, " {key}=\"{}\"", escape(value))?;
    }

    if text.is_empty() {
        writeln!(document, "/>")
    } else {
        writeln!(document, ">{}</{name}>", escape(text))
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c)
        }
    }

    escaped
}
