use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::models::{ProcessingError, RawRow};

/// Columns every input file must carry, matched exactly after trimming whitespace.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "transaction_code",
    "status",
    "timestamp",
    "amount_BRL",
    "network",
    "category",
    "merchant_id",
];

/// Positions of the required columns in the header row. Extra columns are ignored and the first
/// occurrence of a repeated header wins.
struct ColumnIndex {
    transaction_code: usize,
    status: usize,
    timestamp: usize,
    amount: usize,
    network: usize,
    category: usize,
    merchant_id: usize
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, ProcessingError> {
        let positions = REQUIRED_COLUMNS.map(|name| headers.iter().position(|header| header == name));

        match positions {
            [Some(transaction_code), Some(status), Some(timestamp), Some(amount), Some(network), Some(category), Some(merchant_id)] => {
                Ok(Self { transaction_code, status, timestamp, amount, network, category, merchant_id })
            }
            _ => {
                let columns = REQUIRED_COLUMNS
                    .iter()
                    .zip(positions)
                    .filter(|(_, position)| position.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect();

                Err(ProcessingError::MissingColumns { columns })
            }
        }
    }

    fn raw_row(&self, row: usize, record: &StringRecord) -> RawRow {
        let cell = |index: usize| record.get(index).filter(|value| !value.is_empty()).map(str::to_string);

        RawRow {
            row,
            transaction_code: cell(self.transaction_code),
            status: cell(self.status),
            timestamp: cell(self.timestamp),
            amount: cell(self.amount),
            network: cell(self.network),
            category: cell(self.category),
            merchant_id: cell(self.merchant_id)
        }
    }
}

/// Loads every data row of the CSV file at `path`.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>, ProcessingError> {
    let file = File::open(path).map_err(|error| ProcessingError::io(path, error))?;
    let rows = rows_from_reader(BufReader::new(file))?;

    debug!("Read {} rows from {}", rows.len(), path.display());

    Ok(rows)
}

/// Loads every data row from any CSV source. Header names are trimmed before matching.
pub fn rows_from_reader<R: Read>(reader: R) -> Result<Vec<RawRow>, ProcessingError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;
    let mut rows = Vec::new();

    for (index, result) in reader.records().enumerate() {
        rows.push(columns.raw_row(index + 1, &result?));
    }

    Ok(rows)
}
