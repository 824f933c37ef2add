mod errors;
mod job_queue;
mod report_engine;

pub use errors::EngineError;
pub use job_queue::{JobQueue, JobResult, JobStatus};
pub use report_engine::{ReportEngine, ReportOutcome, ReportRequest};
