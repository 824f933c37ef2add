use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::models::Summary;
use crate::notify::{MailTransport, NotifyError};
use crate::settings::EmailSettings;
use crate::types::{format_brl, TargetMonth};

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<PathBuf>
}

/// Sends the monthly report notification through a `MailTransport`.
pub struct EmailNotifier {
    settings: EmailSettings,
    transport: Arc<dyn MailTransport>
}

impl EmailNotifier {
    pub fn new(settings: EmailSettings, transport: Arc<dyn MailTransport>) -> Self {
        Self { settings, transport }
    }

    /// Builds the notification for `month` and hands it to the transport. The XML report is
    /// attached when it exists on disk.
    ///
    /// # Errors
    /// Returns `NotifyError` if no recipient is configured or the transport fails.
    pub fn send_report(&self, month: TargetMonth, summary: &Summary, xml_path: &Path) -> Result<(), NotifyError> {
        let message = self.build_message(month, summary, xml_path)?;

        self.transport.deliver(&message)?;

        info!("Report notification for {month} sent to {}", message.to);

        Ok(())
    }

    pub fn build_message(&self, month: TargetMonth, summary: &Summary, xml_path: &Path) -> Result<EmailMessage, NotifyError> {
        let to = self.settings.to.clone()
            .filter(|to| !to.trim().is_empty())
            .ok_or(NotifyError::MissingRecipient)?;

        let attachment = if xml_path.exists() {
            Some(xml_path.to_path_buf())
        } else {
            debug!("Report {} not found, sending without attachment", xml_path.display());
            None
        };

        Ok(EmailMessage {
            from: self.settings.from.clone(),
            to,
            subject: format!("Transactional Report — {month}"),
            body: build_body(month, summary),
            attachment
        })
    }
}

pub fn build_body(month: TargetMonth, summary: &Summary) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        format!("TRANSACTIONAL REPORT - {month}"),
        rule.clone(),
        String::new(),
        "SUMMARY:".to_string(),
        format!("  - Total transactions: {}", summary.total_count),
        format!("  - Total amount: {}", format_brl(summary.total_amount)),
        format!("  - Chargebacks: {}", summary.chargeback_count),
        String::new(),
    ];

    lines.push("BY STATUS:".to_string());
    lines.extend(summary.counts_by_status.iter().map(|(status, count)| format!("  - {status}: {count}")));
    lines.push(String::new());

    lines.push("BY CATEGORY:".to_string());
    lines.extend(summary.counts_by_category.iter().map(|(category, count)| format!("  - {category}: {count}")));
    lines.push(String::new());

    if !summary.warnings.is_empty() {
        lines.push("ALERTS:".to_string());
        lines.extend(summary.warnings.iter().map(|warning| format!("  ! {warning}")));
        lines.push(String::new());
    }

    lines.extend([
        rule,
        "The complete XML report is attached.".to_string(),
        String::new(),
        "This is an automated notification.".to_string(),
    ]);

    lines.join("\n")
}
