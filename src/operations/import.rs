use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::transaction::TransactionInput;
use crate::operations::export::DEFAULT_COLUMNS;
use crate::store::transaction_store::TransactionStore;

/// Read a report written with [DEFAULT_COLUMNS] back into transaction inputs.
///
/// Rows are returned in file order. Errors name the offending line, counting
/// the header as line 1.
pub fn parse_delimited_text<R: Read>(reader: R) -> Result<Vec<TransactionInput>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let expected: Vec<&str> = DEFAULT_COLUMNS.iter().map(|c| c.header()).collect();
    if headers.iter().collect::<Vec<_>>() != expected {
        return Err(Error::InvalidRow {
            line: 1,
            message: format!("Unexpected header, expected {}", expected.join(",")),
        });
    }

    let mut inputs = Vec::new();

    for (row_index, result) in reader.records().enumerate() {
        let line = row_index + 2;
        let record = result.map_err(|e| Error::InvalidRow {
            line,
            message: format!("CSV parse error: {}", e),
        })?;

        if record.len() != DEFAULT_COLUMNS.len() {
            return Err(Error::InvalidRow {
                line,
                message: format!(
                    "Invalid number of columns: expected {}, got {}",
                    DEFAULT_COLUMNS.len(),
                    record.len()
                ),
            });
        }

        let field = |i: usize| record.get(i).unwrap_or("");
        let input = TransactionInput::from_fields(field(0), field(1), field(2), field(3), field(4), field(5))
            .map_err(|e| Error::InvalidRow {
                line,
                message: e.to_string(),
            })?;

        inputs.push(input);
    }

    Ok(inputs)
}

/// Add every transaction of the report at `path` to the store.
///
/// Reports list the newest transaction first, so rows are added last to
/// first to keep that order at the head of the store.
pub fn import_report(store: &mut TransactionStore, path: &Path) -> Result<usize> {
    let file = File::open(path)
        .map_err(|e| Error::Io(format!("Failed to open file '{}': {}", path.display(), e)))?;

    let mut inputs = parse_delimited_text(file)?;
    inputs.reverse();

    store.import(inputs)
}
