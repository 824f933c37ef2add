use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("No email recipient configured (set EMAIL_TO or pass --email-to)")]
    MissingRecipient,
    #[error("Could not write message {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error
    }
}

impl NotifyError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
