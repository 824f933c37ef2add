use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::engine::EngineError;
use crate::models::{ProcessedReport, Summary, TransactionRecord};
use crate::normalizer::{process, read_rows};
use crate::notify::{EmailNotifier, MailTransport, OutboxTransport};
use crate::reports::{JsonReporter, XmlReporter, REPORT_FILE_NAME, SUMMARY_FILE_NAME};
use crate::settings::Settings;
use crate::types::TargetMonth;

/// One report to produce.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// `YYYY-MM`, validated when the run starts.
    pub month: String,
    pub input_file: PathBuf,
    /// Falls back to the engine's configured output directory.
    pub output_dir: Option<PathBuf>,
    pub send_email: bool
}

impl ReportRequest {
    pub fn new(month: impl Into<String>, input_file: impl Into<PathBuf>) -> Self {
        Self {
            month: month.into(),
            input_file: input_file.into(),
            output_dir: None,
            send_email: false
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub records: Vec<TransactionRecord>,
    pub summary: Summary,
    pub xml_path: PathBuf,
    pub json_path: PathBuf,
    pub emailed: bool
}

/// Runs the full report flow: load, normalize, render both reports and optionally notify.
pub struct ReportEngine {
    settings: Settings,
    notifier: EmailNotifier
}

impl ReportEngine {
    /// Creates an engine whose notifications go to the configured outbox directory.
    pub fn new(settings: Settings) -> Self {
        let transport = Arc::new(OutboxTransport::new(settings.email.outbox_dir.clone()));
        Self::with_transport(settings, transport)
    }

    pub fn with_transport(settings: Settings, transport: Arc<dyn MailTransport>) -> Self {
        let notifier = EmailNotifier::new(settings.email.clone(), transport);
        Self { settings, notifier }
    }

    /// Produces the reports for one request.
    ///
    /// # Errors
    /// Returns `EngineError` if:
    /// - The month is not `YYYY-MM` (checked before the input is touched).
    /// - The input file does not exist or cannot be processed.
    /// - No transaction survives for the month; nothing is written in that case.
    /// - A report cannot be written or the notification fails.
    pub fn run(&self, request: &ReportRequest) -> Result<ReportOutcome, EngineError> {
        let month: TargetMonth = request.month.parse()?;

        if !request.input_file.exists() {
            return Err(EngineError::InputNotFound(request.input_file.clone()));
        }

        info!("Step 1/4: Processing {} for {month}", request.input_file.display());

        let rows = read_rows(&request.input_file)?;
        let ProcessedReport { records, summary } = process(rows, month)?;

        info!("Found {} transactions for {month}", records.len());

        if summary.is_empty() {
            return Err(EngineError::NoTransactions { month: month.to_string() });
        }

        let output_dir = request.output_dir.as_ref()
            .unwrap_or(&self.settings.output_dir)
            .join(month.compact());

        info!("Step 2/4: Generating XML report");
        let xml_path = XmlReporter::new().generate(&records, month, &output_dir.join(REPORT_FILE_NAME))?;

        info!("Step 3/4: Generating JSON summary");
        let json_path = JsonReporter::new().generate(&summary, month, &output_dir.join(SUMMARY_FILE_NAME))?;

        let emailed = if request.send_email {
            info!("Step 4/4: Sending email");
            self.notifier.send_report(month, &summary, &xml_path)?;
            true
        } else {
            info!("Step 4/4: Skipping email");
            false
        };

        Ok(ReportOutcome { records, summary, xml_path, json_path, emailed })
    }
}
