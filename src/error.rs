//! The crate level error type.
use rust_decimal::Decimal;

use crate::models::transaction::TransactionType;

/// The errors that may occur when recording, querying or exporting transactions.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction was submitted without a title.
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// Amounts carry magnitude only, the direction comes from the transaction type.
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    /// The amount text could not be parsed as a decimal number.
    #[error("Invalid amount format {0}. Please provide a valid decimal number.")]
    InvalidAmount(String),

    #[error("Invalid date format {0}. Please use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Invalid transaction type {0}. Use 'income' or 'expense'.")]
    InvalidTransactionType(String),

    /// A transaction was submitted without a category.
    #[error("Category cannot be empty")]
    MissingCategory,

    /// The category name does not match any entry in the catalog.
    #[error("Unknown category \"{0}\"")]
    UnknownCategory(String),

    /// The category exists but may not be used for this transaction type,
    /// e.g. an expense filed under "Consulting".
    #[error("Category \"{category}\" cannot be used for {transaction_type} transactions")]
    CategoryTypeMismatch {
        category: String,
        transaction_type: TransactionType,
    },

    #[error("Invalid period \"{0}\". Use all, current-month, current-year or a year such as 2024.")]
    InvalidPeriod(String),

    #[error("Invalid month \"{0}\". Please use YYYY-MM.")]
    InvalidYearMonth(String),

    #[error("Invalid sort field \"{0}\". Use date, amount or title.")]
    InvalidSortField(String),

    #[error("Invalid sort order \"{0}\". Use asc or desc.")]
    InvalidSortOrder(String),

    /// A comma separated transaction line has too few fields.
    #[error(
        "Invalid number of details provided. Expected at least {expected} details separated by commas but got {found}"
    )]
    MissingFields { expected: usize, found: usize },

    /// A row of a CSV report could not be turned into a transaction.
    #[error("Line {line}: {message}")]
    InvalidRow { line: usize, message: String },

    /// The CSV reader or writer failed.
    ///
    /// Carries the original error as a string so the enum stays comparable.
    #[error("CSV error: {0}")]
    Csv(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Csv(error.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error.to_string())
    }
}

/// Alias for results with the crate [Error].
pub type Result<T> = std::result::Result<T, Error>;
