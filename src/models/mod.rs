mod errors;
mod summary;
mod transaction;

pub use errors::ProcessingError;
pub use summary::Summary;
pub use transaction::{RawRow, TransactionRecord};

/// Status value that marks a reversed or disputed payment.
pub const CHARGEBACK_STATUS: &str = "chargeback";

/// The outcome of one normalization run: the surviving records and their summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedReport {
    pub records: Vec<TransactionRecord>,
    pub summary: Summary
}
