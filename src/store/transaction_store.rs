use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::category::{Category, default_categories};
use crate::models::transaction::{Transaction, TransactionInput, TransactionType};

/// Owns the transaction list and the category catalog.
///
/// Transactions are kept most recent insertion first. The catalog is fixed
/// for the lifetime of the store.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new(default_categories())
    }
}

impl TransactionStore {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            transactions: Vec::new(),
            categories,
        }
    }

    /// A store with the default catalog and a handful of sample transactions.
    pub fn with_demo_data() -> Self {
        let mut store = Self::default();
        store.transactions = demo_transactions();
        store
    }

    /// Validate `input` and insert it at the head of the list.
    pub fn add(&mut self, input: TransactionInput) -> Result<Transaction> {
        if let Err(error) = self.validate(&input) {
            tracing::warn!("Rejected transaction \"{}\": {error}", input.title);
            return Err(error);
        }

        let transaction = Transaction::new(Uuid::new_v4(), input);
        tracing::info!(
            "Added {} transaction {} \"{}\" ({})",
            transaction.transaction_type,
            transaction.id,
            transaction.title,
            transaction.amount
        );
        self.transactions.insert(0, transaction.clone());

        Ok(transaction)
    }

    /// Add every input, or none of them if any input is invalid.
    ///
    /// Inputs are inserted in order, so the last input ends up at the head of
    /// the list. Returns the number of transactions added.
    pub fn import(&mut self, inputs: Vec<TransactionInput>) -> Result<usize> {
        for (index, input) in inputs.iter().enumerate() {
            self.validate(input).map_err(|error| Error::InvalidRow {
                line: index + 1,
                message: error.to_string(),
            })?;
        }

        let count = inputs.len();
        for input in inputs {
            self.add(input)?;
        }
        tracing::info!("Imported {count} transactions");

        Ok(count)
    }

    /// Remove the transaction with the given id.
    ///
    /// Returns `false` when there is no such transaction, which is not an error.
    pub fn remove(&mut self, id: Uuid) -> bool {
        match self.transactions.iter().position(|t| t.id == id) {
            Some(pos) => {
                let removed = self.transactions.remove(pos);
                tracing::info!("Removed transaction {} \"{}\"", removed.id, removed.title);
                true
            }
            None => {
                tracing::debug!("No transaction with ID {id} to remove");
                false
            }
        }
    }

    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// The categories a transaction of the given type may be filed under.
    pub fn categories_for(&self, transaction_type: TransactionType) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.category_type.accepts(transaction_type))
            .collect()
    }

    fn validate(&self, input: &TransactionInput) -> Result<()> {
        if input.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        if input.amount <= Decimal::ZERO {
            return Err(Error::NonPositiveAmount(input.amount));
        }

        if input.category.trim().is_empty() {
            return Err(Error::MissingCategory);
        }

        let category = self
            .category(&input.category)
            .ok_or_else(|| Error::UnknownCategory(input.category.clone()))?;

        if !category.category_type.accepts(input.transaction_type) {
            return Err(Error::CategoryTypeMismatch {
                category: category.name.clone(),
                transaction_type: input.transaction_type,
            });
        }

        Ok(())
    }
}

fn demo_transactions() -> Vec<Transaction> {
    let rows = [
        ("Website Development Project", 2500_00, (2024, 6, 1), "Freelance Work", TransactionType::Income, "Client website project completion"),
        ("Adobe Creative Suite", 52_99, (2024, 6, 1), "Software", TransactionType::Expense, "Monthly subscription"),
        ("Business Consultation", 800_00, (2024, 5, 28), "Consulting", TransactionType::Income, "Strategy consultation session"),
        ("Office Chair", 299_00, (2024, 5, 25), "Office Supplies", TransactionType::Expense, "Ergonomic office chair"),
        ("E-book Sales", 1200_00, (2024, 5, 20), "Product Sales", TransactionType::Income, "Digital product sales"),
        ("Google Ads", 150_00, (2024, 5, 15), "Marketing", TransactionType::Expense, "Online advertising campaign"),
    ];

    rows.into_iter()
        .filter_map(|(title, cents, (y, m, d), category, transaction_type, description)| {
            let date = NaiveDate::from_ymd_opt(y, m, d)?;
            Some(Transaction::new(
                Uuid::new_v4(),
                TransactionInput {
                    title: title.to_string(),
                    amount: Decimal::new(cents, 2),
                    date,
                    category: category.to_string(),
                    transaction_type,
                    description: Some(description.to_string()),
                },
            ))
        })
        .collect()
}
