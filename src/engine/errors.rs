use std::path::PathBuf;

use thiserror::Error;

use crate::models::ProcessingError;
use crate::notify::NotifyError;
use crate::reports::ReportError;
use crate::types::TargetMonthError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Month(#[from] TargetMonthError),
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error(transparent)]
    Processing(#[from] ProcessingError),
    #[error("No transactions found for {month}")]
    NoTransactions {
        month: String
    },
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("Email failed: {0}")]
    Notify(#[from] NotifyError),
    #[error("Report job [{0}] was not found")]
    JobNotFound(String),
    #[error("Report job [{job_id}] did not finish: {reason}")]
    JobAborted {
        job_id: String,
        reason: String
    }
}
