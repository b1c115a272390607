use std::fmt;

use crate::models::transaction::TransactionType;

/// Which transaction types a category may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryType {
    Income,
    Expense,
    Both,
}

impl CategoryType {
    pub fn accepts(self, transaction_type: TransactionType) -> bool {
        matches!(
            (self, transaction_type),
            (CategoryType::Both, _)
                | (CategoryType::Income, TransactionType::Income)
                | (CategoryType::Expense, TransactionType::Expense)
        )
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryType::Income => "income",
            CategoryType::Expense => "expense",
            CategoryType::Both => "both",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: u32,
    /// Unique, transactions refer to their category by this name.
    pub name: String,
    /// Display tag only.
    pub color: String,
    pub category_type: CategoryType,
}

impl Category {
    pub fn new(id: u32, name: &str, color: &str, category_type: CategoryType) -> Self {
        Self {
            id,
            name: name.to_string(),
            color: color.to_string(),
            category_type,
        }
    }
}

/// The catalog every store starts with.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(1, "Freelance Work", "green-500", CategoryType::Income),
        Category::new(2, "Consulting", "emerald-500", CategoryType::Income),
        Category::new(3, "Product Sales", "teal-500", CategoryType::Income),
        Category::new(4, "Office Supplies", "blue-500", CategoryType::Expense),
        Category::new(5, "Software", "indigo-500", CategoryType::Expense),
        Category::new(6, "Marketing", "purple-500", CategoryType::Expense),
        Category::new(7, "Travel", "pink-500", CategoryType::Expense),
        Category::new(8, "Meals", "orange-500", CategoryType::Expense),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_type_accepts() {
        assert!(CategoryType::Income.accepts(TransactionType::Income));
        assert!(!CategoryType::Income.accepts(TransactionType::Expense));
        assert!(CategoryType::Expense.accepts(TransactionType::Expense));
        assert!(CategoryType::Both.accepts(TransactionType::Income));
        assert!(CategoryType::Both.accepts(TransactionType::Expense));
    }

    #[test]
    fn test_default_category_names_are_unique() {
        let categories = default_categories();
        let mut names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), categories.len());
    }
}
