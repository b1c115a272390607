use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::models::transaction::Transaction;
use crate::operations::period::Period;

/// A column of the CSV report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Title,
    Amount,
    Date,
    Category,
    Type,
    Description,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Title => "Title",
            Column::Amount => "Amount",
            Column::Date => "Date",
            Column::Category => "Category",
            Column::Type => "Type",
            Column::Description => "Description",
        }
    }

    fn value(self, transaction: &Transaction) -> String {
        match self {
            Column::Title => transaction.title.clone(),
            // Plain decimal without trailing zeros, e.g. 2500 and 52.99.
            Column::Amount => transaction.amount.normalize().to_string(),
            Column::Date => transaction.date.format("%Y-%m-%d").to_string(),
            Column::Category => transaction.category.clone(),
            Column::Type => transaction.transaction_type.to_string(),
            Column::Description => transaction.description.clone().unwrap_or_default(),
        }
    }
}

/// The columns of a full report, in the order they are written.
pub const DEFAULT_COLUMNS: [Column; 6] = [
    Column::Title,
    Column::Amount,
    Column::Date,
    Column::Category,
    Column::Type,
    Column::Description,
];

/// Render `transactions` as CSV: a header row, then one row per transaction
/// in the given order.
///
/// Fields containing a comma, a double quote or a line break are quoted.
pub fn to_delimited_text<'a, I>(transactions: I, columns: &[Column]) -> Result<String>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.header()))?;

    let mut rows = 0;
    for transaction in transactions {
        writer.write_record(columns.iter().map(|c| c.value(transaction)))?;
        rows += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Csv(format!("Failed to flush CSV writer: {}", e)))?;
    tracing::debug!("Rendered {rows} transactions as CSV");

    String::from_utf8(bytes).map_err(|e| Error::Csv(e.to_string()))
}

/// e.g. `bookly-report-current-year-1717200000000.csv`
pub fn report_file_name(period: Period, now: DateTime<Utc>) -> String {
    format!("bookly-report-{}-{}.csv", period.slug(), now.timestamp_millis())
}

/// Write a full report of `transactions` into `dir` and return the file path.
pub fn write_report<'a, I>(dir: &Path, period: Period, transactions: I, now: DateTime<Utc>) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let text = to_delimited_text(transactions, &DEFAULT_COLUMNS)?;
    let path = dir.join(report_file_name(period, now));

    fs::write(&path, text)
        .map_err(|e| Error::Io(format!("Failed to write report '{}': {}", path.display(), e)))?;
    tracing::info!("Exported {period} report to {}", path.display());

    Ok(path)
}
