use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::Error;
use crate::models::transaction::{Transaction, TransactionType};

/// A calendar month, e.g. 2024-06.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidYearMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

/// The calendar window a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    All,
    CurrentMonth,
    CurrentYear,
    SpecificYear(i32),
}

impl Period {
    /// Short name used in report file names.
    pub fn slug(&self) -> String {
        match self {
            Period::All => "all".to_string(),
            Period::CurrentMonth => "current-month".to_string(),
            Period::CurrentYear => "current-year".to_string(),
            Period::SpecificYear(_) => "specific-year".to_string(),
        }
    }

    /// The year whose months a monthly series should cover, if the period is
    /// exactly one year.
    pub fn year(&self, today: NaiveDate) -> Option<i32> {
        match self {
            Period::CurrentYear => Some(today.year()),
            Period::SpecificYear(year) => Some(*year),
            Period::All | Period::CurrentMonth => None,
        }
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Period::All => true,
            Period::CurrentMonth => YearMonth::of(today).contains(date),
            Period::CurrentYear => date.year() == today.year(),
            Period::SpecificYear(year) => date.year() == *year,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::SpecificYear(year) => write!(f, "{year}"),
            other => f.write_str(&other.slug()),
        }
    }
}

/// Accepts `all`, `current-month`, `current-year`, a bare year such as
/// `2024`, or `specific-year:2024`.
impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_lowercase();
        let year_text = text.strip_prefix("specific-year:").unwrap_or(&text);

        match text.as_str() {
            "all" => Ok(Period::All),
            "current-month" => Ok(Period::CurrentMonth),
            "current-year" => Ok(Period::CurrentYear),
            _ if year_text.len() == 4 && year_text.bytes().all(|b| b.is_ascii_digit()) => year_text
                .parse()
                .map(Period::SpecificYear)
                .map_err(|_| Error::InvalidPeriod(s.to_string())),
            _ => Err(Error::InvalidPeriod(s.to_string())),
        }
    }
}

/// Keep the transactions that fall within `period`, relative to `today`.
pub fn scope_to_period<'a, I>(transactions: I, period: Period, today: NaiveDate) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| period.contains(t.date, today))
        .collect()
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Income and expenses of one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyPoint {
    /// 1 for January through 12 for December.
    pub month: u32,
    pub label: &'static str,
    pub income: Decimal,
    pub expense: Decimal,
    /// `income - expense`
    pub net: Decimal,
}

/// One entry per month of `year`, January first. Months without transactions
/// are reported with zero totals.
pub fn monthly_series<'a, I>(transactions: I, year: i32) -> Vec<MonthlyPoint>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut series: Vec<MonthlyPoint> = MONTH_LABELS
        .iter()
        .zip(1..)
        .map(|(&label, month)| MonthlyPoint {
            month,
            label,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            net: Decimal::ZERO,
        })
        .collect();

    for transaction in transactions.into_iter().filter(|t| t.date.year() == year) {
        let point = &mut series[transaction.date.month0() as usize];
        match transaction.transaction_type {
            TransactionType::Income => point.income += transaction.amount,
            TransactionType::Expense => point.expense += transaction.amount,
        }
        point.net = point.income - point.expense;
    }

    series
}

/// Distinct years that have transactions, newest first.
pub fn available_years<'a, I>(transactions: I) -> Vec<i32>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut years: Vec<i32> = transactions.into_iter().map(|t| t.date.year()).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("Invalid date")
    }

    fn create_test_transaction(title: &str, date: NaiveDate) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            title: title.to_string(),
            amount: Decimal::new(100, 0),
            date,
            category: "Meals".to_string(),
            transaction_type: TransactionType::Expense,
            description: None,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            create_test_transaction("june", date(2024, 6, 1)),
            create_test_transaction("may", date(2024, 5, 31)),
            create_test_transaction("last year", date(2023, 6, 15)),
            create_test_transaction("new year", date(2025, 1, 1)),
        ]
    }

    fn titles(transactions: &[&Transaction]) -> Vec<String> {
        transactions.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_scope_all() {
        let transactions = sample();
        let result = scope_to_period(&transactions, Period::All, date(2024, 6, 20));
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_scope_current_month() {
        let transactions = sample();
        let result = scope_to_period(&transactions, Period::CurrentMonth, date(2024, 6, 20));
        assert_eq!(titles(&result), vec!["june"]);
    }

    #[test]
    fn test_scope_current_year() {
        let transactions = sample();
        let result = scope_to_period(&transactions, Period::CurrentYear, date(2024, 6, 20));
        assert_eq!(titles(&result), vec!["june", "may"]);
    }

    #[test]
    fn test_scope_specific_year() {
        let transactions = sample();
        let result = scope_to_period(&transactions, Period::SpecificYear(2023), date(2024, 6, 20));
        assert_eq!(titles(&result), vec!["last year"]);
    }

    #[test]
    fn test_scope_specific_year_without_matches() {
        let transactions = vec![
            create_test_transaction("a", date(2024, 6, 1)),
            create_test_transaction("b", date(2024, 12, 31)),
        ];
        let result = scope_to_period(&transactions, Period::SpecificYear(2023), date(2024, 6, 20));
        assert!(result.is_empty());
    }

    #[test]
    fn test_monthly_series_always_has_twelve_months() {
        assert_eq!(monthly_series(&Vec::<Transaction>::new(), 2024).len(), 12);

        let many: Vec<Transaction> = (0..1000)
            .map(|i| create_test_transaction("bulk", date(2024, i % 12 + 1, 1)))
            .collect();
        let series = monthly_series(&many, 2024);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0].label, "Jan");
        assert_eq!(series[11].month, 12);
    }

    #[test]
    fn test_monthly_series_sums_by_month() {
        let mut transactions = sample();
        transactions.push(Transaction {
            transaction_type: TransactionType::Income,
            amount: Decimal::new(250, 0),
            ..create_test_transaction("refund", date(2024, 6, 10))
        });

        let series = monthly_series(&transactions, 2024);
        let june = &series[5];
        assert_eq!(june.label, "Jun");
        assert_eq!(june.income, Decimal::new(250, 0));
        assert_eq!(june.expense, Decimal::new(100, 0));
        assert_eq!(june.net, Decimal::new(150, 0));

        assert_eq!(series[4].expense, Decimal::new(100, 0));
        assert_eq!(series[4].net, Decimal::new(-100, 0));
        let quiet_months = series
            .iter()
            .filter(|p| p.month != 5 && p.month != 6)
            .all(|p| p.income.is_zero() && p.expense.is_zero() && p.net.is_zero());
        assert!(quiet_months);
    }

    #[test]
    fn test_available_years() {
        let transactions = sample();
        assert_eq!(available_years(&transactions), vec![2025, 2024, 2023]);
        assert!(available_years(&Vec::<Transaction>::new()).is_empty());
    }

    #[test]
    fn test_period_from_str() {
        assert_eq!("all".parse::<Period>(), Ok(Period::All));
        assert_eq!("Current-Month".parse::<Period>(), Ok(Period::CurrentMonth));
        assert_eq!("current-year".parse::<Period>(), Ok(Period::CurrentYear));
        assert_eq!("2023".parse::<Period>(), Ok(Period::SpecificYear(2023)));
        assert_eq!("specific-year:2022".parse::<Period>(), Ok(Period::SpecificYear(2022)));
        assert_eq!(
            "last-week".parse::<Period>(),
            Err(Error::InvalidPeriod("last-week".to_string()))
        );
        assert!("20x4".parse::<Period>().is_err());
        assert!("-123".parse::<Period>().is_err());
        assert!("+202".parse::<Period>().is_err());
        assert!("specific-year:-999".parse::<Period>().is_err());
    }

    #[test]
    fn test_year_month_from_str() {
        assert_eq!("2024-06".parse::<YearMonth>(), Ok(YearMonth { year: 2024, month: 6 }));
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-6".parse::<YearMonth>().is_err());
        assert!("June".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_year_month_display() {
        assert_eq!(YearMonth::of(date(2024, 3, 9)).to_string(), "2024-03");
    }
}
