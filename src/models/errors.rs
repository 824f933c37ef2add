use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::RawRow;
use crate::types::MonetaryError;

/// Fatal problems with the input. Any of these aborts the whole run.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Could not read input file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error
    },
    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required columns: {}", columns.join(", "))]
    MissingColumns {
        columns: Vec<String>
    },
    #[error("Invalid amount '{value}' in row [{row}] for transaction [{code}]: {source}")]
    InvalidAmount {
        row: usize,
        code: String,
        value: String,
        #[source]
        source: MonetaryError
    },
    #[error("Network '{value}' in row [{row}] for transaction [{code}] is not an integer")]
    InvalidNetwork {
        row: usize,
        code: String,
        value: String
    }
}

impl ProcessingError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn invalid_amount(raw: &RawRow, source: MonetaryError) -> Self {
        Self::InvalidAmount {
            row: raw.row,
            code: raw.code().to_string(),
            value: raw.amount.clone().unwrap_or_default(),
            source
        }
    }

    pub fn invalid_network(row: usize, code: &str, value: Option<&str>) -> Self {
        Self::InvalidNetwork {
            row,
            code: code.to_string(),
            value: value.unwrap_or_default().to_string()
        }
    }
}
