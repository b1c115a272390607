use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(Error::InvalidTransactionType(s.to_string())),
        }
    }
}

/// A recorded income or expense event.
///
/// Transactions are immutable once created. The store hands out fresh ids and
/// only supports deleting a transaction as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    /// Always positive, see [Transaction::signed_amount] for the direction.
    pub amount: Decimal,
    pub date: NaiveDate,
    /// Name of the category in the catalog.
    pub category: String,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(id: Uuid, input: TransactionInput) -> Self {
        Self {
            id,
            title: input.title,
            amount: input.amount,
            date: input.date,
            category: input.category,
            transaction_type: input.transaction_type,
            description: input.description.filter(|d| !d.is_empty()),
        }
    }

    /// The amount with income positive and expenses negative.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// The user supplied fields of a transaction, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub title: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
    pub transaction_type: TransactionType,
    pub description: Option<String>,
}

impl TransactionInput {
    /// Parse the raw text fields of a transaction.
    ///
    /// Only the shape of each field is checked here. Whether the amount is
    /// positive and the category fits the type is decided by the store.
    /// Title and description are kept as given, an empty description is none.
    pub fn from_fields(
        title: &str,
        amount: &str,
        date: &str,
        category: &str,
        transaction_type: &str,
        description: &str,
    ) -> Result<Self, Error> {
        let amount = Decimal::from_str(amount.trim())
            .map_err(|_| Error::InvalidAmount(amount.trim().to_string()))?;

        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| Error::InvalidDate(date.trim().to_string()))?;

        let transaction_type = transaction_type.parse()?;

        let description = match description {
            "" => None,
            text => Some(text.to_string()),
        };

        Ok(Self {
            title: title.to_string(),
            amount,
            date,
            category: category.trim().to_string(),
            transaction_type,
            description,
        })
    }

    /// Parse a line of the form
    /// `title, amount, date(YYYY-MM-DD), category, type(income/expense)[, description]`.
    ///
    /// Everything after the fifth comma belongs to the description, so
    /// descriptions may contain commas.
    pub fn parse_line(line: &str) -> Result<Self, Error> {
        let parts: Vec<&str> = line.splitn(6, ',').map(|s| s.trim()).collect();
        if parts.len() < 5 {
            return Err(Error::MissingFields {
                expected: 5,
                found: parts.len(),
            });
        }

        Self::from_fields(
            parts[0],
            parts[1],
            parts[2],
            parts[3],
            parts[4],
            parts.get(5).copied().unwrap_or(""),
        )
    }
}
