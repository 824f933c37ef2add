use std::path::PathBuf;

use clap::Parser;

use crate::engine::ReportRequest;

pub const DEFAULT_OUTPUT_DIR: &str = "./outputs";
pub const DEFAULT_OUTBOX_DIR: &str = "./outbox";
pub const DEFAULT_SENDER: &str = "reports@localhost";

/// Monthly transaction report generator
#[derive(Parser, Debug, Clone)]
#[command(name = "transaction-report", about = "Monthly transaction report generator", version)]
pub struct Cli {
    /// Target month in YYYY-MM format (e.g. 2023-08)
    #[arg(long)]
    pub month: String,

    /// Path to the input CSV file
    #[arg(long)]
    pub input: PathBuf,

    /// Output directory for reports
    #[arg(long, env = "REPORT_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Send an email notification with the report
    #[arg(long)]
    pub send_email: bool,

    /// Notification recipient
    #[arg(long, env = "EMAIL_TO")]
    pub email_to: Option<String>,

    /// Notification sender
    #[arg(long, env = "EMAIL_FROM", default_value = DEFAULT_SENDER)]
    pub email_from: String,

    /// Directory where outgoing messages are written
    #[arg(long, env = "REPORT_OUTBOX_DIR", default_value = DEFAULT_OUTBOX_DIR)]
    pub outbox: PathBuf,

    /// Logging level: error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            output_dir: self.output.clone(),
            email: EmailSettings {
                to: self.email_to.clone(),
                from: self.email_from.clone(),
                outbox_dir: self.outbox.clone()
            }
        }
    }

    pub fn request(&self) -> ReportRequest {
        ReportRequest {
            month: self.month.clone(),
            input_file: self.input.clone(),
            output_dir: Some(self.output.clone()),
            send_email: self.send_email
        }
    }
}

/// Everything a report run needs besides the request itself.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Used when a request does not name its own output directory.
    pub output_dir: PathBuf,
    pub email: EmailSettings
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            email: EmailSettings::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub to: Option<String>,
    pub from: String,
    pub outbox_dir: PathBuf
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            to: None,
            from: DEFAULT_SENDER.to_string(),
            outbox_dir: PathBuf::from(DEFAULT_OUTBOX_DIR)
        }
    }
}
