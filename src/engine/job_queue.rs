use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::engine::{EngineError, ReportEngine, ReportOutcome, ReportRequest};

pub type JobId = String;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobResult {
    pub transactions_count: usize,
    pub total_amount: Decimal,
    pub chargebacks: usize,
    pub warnings: Vec<String>,
    pub xml_path: PathBuf,
    pub json_path: PathBuf,
    pub emailed: bool
}

impl From<&ReportOutcome> for JobResult {
    fn from(outcome: &ReportOutcome) -> Self {
        Self {
            transactions_count: outcome.records.len(),
            total_amount: outcome.summary.total_amount,
            chargebacks: outcome.summary.chargeback_count,
            warnings: outcome.summary.warnings.clone(),
            xml_path: outcome.xml_path.clone(),
            json_path: outcome.json_path.clone(),
            emailed: outcome.emailed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed {
        result: JobResult
    },
    Failed {
        error: String
    }
}

impl JobStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, JobStatus::Completed { .. } | JobStatus::Failed { .. })
    }
}

/// A snapshot of one background report run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub job_id: JobId,
    pub month: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub status: JobStatus
}

impl Job {
    fn pending(job_id: JobId, month: String) -> Self {
        Self {
            job_id,
            month,
            created_at: Utc::now(),
            completed_at: None,
            status: JobStatus::Pending
        }
    }
}

/// Runs report requests in the background and keeps track of their progress.
///
/// Must be used from inside a tokio runtime; each job runs on the blocking pool.
pub struct JobQueue {
    engine: Arc<ReportEngine>,
    jobs: Arc<DashMap<JobId, Job>>
}

impl JobQueue {
    pub fn new(engine: ReportEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            jobs: Arc::new(DashMap::new())
        }
    }

    /// Registers a pending job for `request` and starts it.
    ///
    /// # Errors
    /// Returns `EngineError::InputNotFound` without creating a job when the input file is missing.
    pub fn submit(&self, request: ReportRequest) -> Result<JobHandle, EngineError> {
        if !request.input_file.exists() {
            return Err(EngineError::InputNotFound(request.input_file));
        }

        let job_id = Uuid::new_v4().to_string();
        self.jobs.insert(job_id.clone(), Job::pending(job_id.clone(), request.month.clone()));

        info!("Job [{job_id}] queued for {}", request.month);

        let engine = self.engine.clone();
        let jobs = self.jobs.clone();
        let id = job_id.clone();

        let handle = spawn_blocking(move || {
            update(&jobs, &id, |job| job.status = JobStatus::Processing);

            let status = match engine.run(&request) {
                Ok(outcome) => JobStatus::Completed { result: JobResult::from(&outcome) },
                Err(error) => {
                    error!("Job [{id}] failed: {error}");
                    JobStatus::Failed { error: error.to_string() }
                }
            };

            update(&jobs, &id, |job| {
                job.status = status;
                job.completed_at = Some(Utc::now());
            });

            debug!("Job [{id}] finished");
        });

        Ok(JobHandle { job_id, jobs: self.jobs.clone(), handle })
    }

    pub fn get(&self, job_id: &str) -> Option<Job> {
        self.jobs.get(job_id).map(|entry| entry.value().clone())
    }
}

fn update(jobs: &DashMap<JobId, Job>, job_id: &str, apply: impl FnOnce(&mut Job)) {
    if let Some(mut job) = jobs.get_mut(job_id) {
        apply(job.value_mut());
    }
}

/// Awaitable handle to a submitted job.
pub struct JobHandle {
    pub job_id: JobId,
    jobs: Arc<DashMap<JobId, Job>>,
    handle: JoinHandle<()>
}

impl JobHandle {
    /// Waits for the job to reach a terminal state and returns its final snapshot.
    pub async fn wait(self) -> Result<Job, EngineError> {
        self.handle.await.map_err(|error| EngineError::JobAborted {
            job_id: self.job_id.clone(),
            reason: error.to_string()
        })?;

        let job = self.jobs.get(&self.job_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| EngineError::JobNotFound(self.job_id.clone()))?;

        if !job.status.is_finished() {
            return Err(EngineError::JobAborted {
                job_id: self.job_id,
                reason: "job stopped before reaching a terminal state".to_string()
            });
        }

        Ok(job)
    }
}
