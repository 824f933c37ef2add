use std::{fmt, io};
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Could not write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("Could not serialize summary: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not render report: {0}")]
    Format(#[from] fmt::Error)
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
