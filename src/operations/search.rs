use std::borrow::Borrow;
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::Error;
use crate::models::transaction::{Transaction, TransactionType};

/// Criteria for narrowing down the transaction list.
///
/// `None` for the category or type means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub search_term: String,
    pub category: Option<String>,
    pub transaction_type: Option<TransactionType>,
}

impl TransactionFilter {
    /// Build a filter from the textual form used by the front end, where
    /// `all` disables the category or type criterion. The search term is used
    /// as typed, surrounding whitespace included.
    pub fn from_fields(search_term: &str, category: &str, transaction_type: &str) -> Result<Self, Error> {
        let category = match category.trim() {
            "" | "all" => None,
            name => Some(name.to_string()),
        };

        let transaction_type = match transaction_type.trim() {
            "" | "all" => None,
            text => Some(text.parse()?),
        };

        Ok(Self {
            search_term: search_term.to_string(),
            category,
            transaction_type,
        })
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(t) = self.transaction_type {
            if transaction.transaction_type != t {
                return false;
            }
        }

        if let Some(ref category) = self.category {
            if transaction.category != *category {
                return false;
            }
        }

        if self.search_term.is_empty() {
            return true;
        }

        let needle = self.search_term.to_lowercase();
        transaction.title.to_lowercase().contains(&needle)
            || transaction
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}

pub fn filter_transactions<'a, I>(transactions: I, filter: &TransactionFilter) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let matches: Vec<&Transaction> = transactions
        .into_iter()
        .filter(|transaction| filter.matches(transaction))
        .collect();
    tracing::debug!("Filter {filter:?} matched {} transactions", matches.len());
    matches
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Amount,
    Title,
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "amount" => Ok(SortField::Amount),
            "title" => Ok(SortField::Title),
            _ => Err(Error::InvalidSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(Error::InvalidSortOrder(s.to_string())),
        }
    }
}

fn compare(a: &Transaction, b: &Transaction, field: SortField) -> Ordering {
    match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
    }
}

/// Sort in place. The sort is stable in both directions: transactions with
/// equal keys keep their relative order.
///
/// Works on owned transactions as well as on references returned by
/// [filter_transactions].
pub fn sort_transactions<T: Borrow<Transaction>>(transactions: &mut [T], field: SortField, order: SortOrder) {
    transactions.sort_by(|a, b| {
        let (a, b): (&Transaction, &Transaction) = (a.borrow(), b.borrow());
        let ordering = compare(a, b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn create_test_transaction(
        title: &str,
        amount: i64,
        date: (i32, u32, u32),
        category: &str,
        transaction_type: TransactionType,
        description: Option<&str>,
    ) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            title: title.to_string(),
            amount: Decimal::new(amount, 0),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("Invalid date"),
            category: category.to_string(),
            transaction_type,
            description: description.map(str::to_string),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            create_test_transaction("Website Development", 2500, (2024, 6, 1), "Freelance Work", TransactionType::Income, Some("Client project")),
            create_test_transaction("Adobe Creative Suite", 53, (2024, 6, 1), "Software", TransactionType::Expense, Some("Monthly subscription")),
            create_test_transaction("Hosting", 20, (2024, 5, 28), "Software", TransactionType::Expense, Some("WEB server rental")),
            create_test_transaction("office chair", 299, (2024, 5, 25), "Office Supplies", TransactionType::Expense, None),
            create_test_transaction("Business Consultation", 800, (2024, 5, 20), "Consulting", TransactionType::Income, None),
        ]
    }

    fn titles<T: Borrow<Transaction>>(transactions: &[T]) -> Vec<&str> {
        transactions
            .iter()
            .map(|t| Borrow::<Transaction>::borrow(t).title.as_str())
            .collect()
    }

    #[test]
    fn test_filter_search_title_or_description_case_insensitive() {
        let transactions = sample();
        let filter = TransactionFilter::from_fields("web", "all", "all").unwrap();

        let result = filter_transactions(&transactions, &filter);
        assert_eq!(titles(&result), vec!["Website Development", "Hosting"]);
    }

    #[test]
    fn test_filter_search_term_keeps_whitespace() {
        let transactions = vec![
            create_test_transaction("Custom web app", 900, (2024, 6, 2), "Freelance Work", TransactionType::Income, None),
            create_test_transaction("Website Development", 2500, (2024, 6, 1), "Freelance Work", TransactionType::Income, None),
        ];
        let filter = TransactionFilter::from_fields(" web", "all", "all").unwrap();

        let result = filter_transactions(&transactions, &filter);
        assert_eq!(titles(&result), vec!["Custom web app"]);
    }

    #[test]
    fn test_filter_empty_search_matches_everything() {
        let transactions = sample();
        let result = filter_transactions(&transactions, &TransactionFilter::default());
        assert_eq!(result.len(), transactions.len());
    }

    #[test]
    fn test_filter_by_category_and_type() {
        let transactions = sample();

        let software = TransactionFilter::from_fields("", "Software", "all").unwrap();
        assert_eq!(
            titles(&filter_transactions(&transactions, &software)),
            vec!["Adobe Creative Suite", "Hosting"]
        );

        let income = TransactionFilter::from_fields("", "all", "income").unwrap();
        assert_eq!(
            titles(&filter_transactions(&transactions, &income)),
            vec!["Website Development", "Business Consultation"]
        );

        let nothing = TransactionFilter::from_fields("", "Software", "income").unwrap();
        assert!(filter_transactions(&transactions, &nothing).is_empty());
    }

    #[test]
    fn test_filter_category_is_exact() {
        let transactions = sample();
        let filter = TransactionFilter::from_fields("", "software", "all").unwrap();
        assert!(filter_transactions(&transactions, &filter).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let transactions = sample();
        let filter = TransactionFilter::from_fields("o", "all", "expense").unwrap();

        let once = filter_transactions(&transactions, &filter);
        let twice = filter_transactions(once.iter().copied(), &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_invalid_type() {
        let result = TransactionFilter::from_fields("", "all", "transfer");
        assert_eq!(result, Err(Error::InvalidTransactionType("transfer".to_string())));
    }

    #[test]
    fn test_sort_by_amount() {
        let mut transactions = sample();
        sort_transactions(&mut transactions, SortField::Amount, SortOrder::Asc);
        let amounts: Vec<Decimal> = transactions.iter().map(|t| t.amount).collect();
        assert_eq!(
            amounts,
            vec![20, 53, 299, 800, 2500].into_iter().map(|a| Decimal::new(a, 0)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_sort_by_title_case_insensitive() {
        let mut transactions = sample();
        sort_transactions(&mut transactions, SortField::Title, SortOrder::Asc);
        assert_eq!(
            titles(&transactions),
            vec!["Adobe Creative Suite", "Business Consultation", "Hosting", "office chair", "Website Development"]
        );
    }

    #[test]
    fn test_sort_by_date_is_stable_in_both_directions() {
        let mut transactions = sample();
        sort_transactions(&mut transactions, SortField::Date, SortOrder::Desc);
        assert_eq!(
            titles(&transactions),
            vec!["Website Development", "Adobe Creative Suite", "Hosting", "office chair", "Business Consultation"]
        );

        let mut transactions = sample();
        sort_transactions(&mut transactions, SortField::Date, SortOrder::Asc);
        assert_eq!(
            titles(&transactions),
            vec!["Business Consultation", "office chair", "Hosting", "Website Development", "Adobe Creative Suite"]
        );
    }

    #[test]
    fn test_sort_references() {
        let transactions = sample();
        let filter = TransactionFilter::from_fields("", "all", "expense").unwrap();
        let mut expenses = filter_transactions(&transactions, &filter);

        sort_transactions(&mut expenses, SortField::Amount, SortOrder::Desc);
        assert_eq!(titles(&expenses), vec!["office chair", "Adobe Creative Suite", "Hosting"]);
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("ASC".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("desc".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("up".parse::<SortOrder>().is_err());
        assert_eq!("amount".parse::<SortField>(), Ok(SortField::Amount));
    }
}
