use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::category::Category;
use crate::models::transaction::Transaction;
use crate::operations::aggregate::{
    self, CategoryBreakdown, CategoryReportRow, MonthlyTotals, Totals,
};
use crate::operations::period::{self, MonthlyPoint, Period, YearMonth};

/// How many transactions the dashboard lists as recent activity.
pub const RECENT_TRANSACTION_COUNT: usize = 5;

/// All-time figures plus the current month.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard<'a> {
    pub totals: Totals,
    pub this_month: MonthlyTotals,
    pub recent: Vec<&'a Transaction>,
    pub breakdown: Vec<CategoryBreakdown>,
}

pub fn dashboard(transactions: &[Transaction], today: NaiveDate) -> Dashboard<'_> {
    Dashboard {
        totals: aggregate::totals(transactions),
        this_month: aggregate::monthly_totals(transactions, YearMonth::of(today)),
        recent: aggregate::recent(transactions, RECENT_TRANSACTION_COUNT),
        breakdown: aggregate::category_breakdown(transactions),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report<'a> {
    pub period: Period,
    pub transactions: Vec<&'a Transaction>,
    pub summary: ReportSummary,
    pub categories: Vec<CategoryReportRow>,
    /// Only present when the period covers exactly one year.
    pub monthly: Option<Vec<MonthlyPoint>>,
}

/// Everything the reports view shows for `period`.
pub fn build_report<'a>(
    transactions: &'a [Transaction],
    categories: &[Category],
    period: Period,
    today: NaiveDate,
) -> Report<'a> {
    let scoped = period::scope_to_period(transactions, period, today);
    let totals = aggregate::totals(scoped.iter().copied());

    let summary = ReportSummary {
        total_income: totals.total_income,
        total_expenses: totals.total_expenses,
        net_income: totals.balance,
        transaction_count: scoped.len(),
    };

    let monthly = period
        .year(today)
        .map(|year| period::monthly_series(scoped.iter().copied(), year));

    tracing::debug!(
        "Built {period} report over {} of {} transactions",
        scoped.len(),
        transactions.len()
    );

    Report {
        period,
        summary,
        categories: aggregate::category_report(scoped.iter().copied(), categories),
        monthly,
        transactions: scoped,
    }
}
