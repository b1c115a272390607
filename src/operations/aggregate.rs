use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::category::Category;
use crate::models::transaction::{Transaction, TransactionType};
use crate::operations::period::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthlyTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub income: Decimal,
    pub expense: Decimal,
    /// `income + expense`
    pub total: Decimal,
}

/// A breakdown row joined with the catalog entry of its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReportRow {
    pub breakdown: CategoryBreakdown,
    /// `None` when the category name is not in the catalog.
    pub color: Option<String>,
}

impl CategoryReportRow {
    pub fn is_uncategorized(&self) -> bool {
        self.color.is_none()
    }
}

/// Sum income and expenses separately.
fn sum_by_type<'a, I>(transactions: I) -> (Decimal, Decimal)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(income, expense), t| {
            match t.transaction_type {
                TransactionType::Income => (income + t.amount, expense),
                TransactionType::Expense => (income, expense + t.amount),
            }
        })
}

pub fn totals<'a, I>(transactions: I) -> Totals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (total_income, total_expenses) = sum_by_type(transactions);
    Totals {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

pub fn monthly_totals<'a, I>(transactions: I, year_month: YearMonth) -> MonthlyTotals
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income, expense) = sum_by_type(
        transactions
            .into_iter()
            .filter(|t| year_month.contains(t.date)),
    );
    MonthlyTotals { income, expense }
}

/// Group by category name, in order of first appearance.
///
/// Names are not checked against the catalog, so an orphaned category still
/// gets its own row.
pub fn category_breakdown<'a, I>(transactions: I) -> Vec<CategoryBreakdown>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut rows: Vec<CategoryBreakdown> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions {
        let idx = *index_by_name
            .entry(transaction.category.as_str())
            .or_insert_with(|| {
                rows.push(CategoryBreakdown {
                    category: transaction.category.clone(),
                    income: Decimal::ZERO,
                    expense: Decimal::ZERO,
                    total: Decimal::ZERO,
                });
                rows.len() - 1
            });

        let row = &mut rows[idx];
        match transaction.transaction_type {
            TransactionType::Income => row.income += transaction.amount,
            TransactionType::Expense => row.expense += transaction.amount,
        }
        row.total += transaction.amount;
    }

    rows
}

/// The category breakdown joined to `categories`, largest total first.
pub fn category_report<'a, I>(transactions: I, categories: &[Category]) -> Vec<CategoryReportRow>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut rows: Vec<CategoryReportRow> = category_breakdown(transactions)
        .into_iter()
        .map(|breakdown| {
            let color = categories
                .iter()
                .find(|c| c.name == breakdown.category)
                .map(|c| c.color.clone());
            CategoryReportRow { breakdown, color }
        })
        .collect();

    rows.sort_by(|a, b| b.breakdown.total.cmp(&a.breakdown.total));
    rows
}

/// The `n` latest transactions by date. Transactions on the same date keep
/// their relative order.
pub fn recent<'a, I>(transactions: I, n: usize) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut latest: Vec<&Transaction> = transactions.into_iter().collect();
    latest.sort_by(|a, b| b.date.cmp(&a.date));
    latest.truncate(n);
    latest
}
