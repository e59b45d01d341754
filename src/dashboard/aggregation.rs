//! Transaction aggregation for the dashboard.
//!
//! Computes income and expense totals, the largest expense categories and the
//! most recent transactions from the full list returned by the Gateway.

use crate::transaction::{Transaction, TransactionType};

/// The maximum number of expense categories shown on the dashboard.
pub const MAX_CATEGORIES: usize = 5;
/// The maximum number of transactions in the recent list.
pub const MAX_RECENT: usize = 5;

/// The summed expenses of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category label.
    pub category: String,
    /// The sum of the expense amounts in `category`.
    pub total: f64,
}

/// The figures shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSummary {
    /// The sum of all income amounts.
    pub total_income: f64,
    /// The sum of all expense amounts.
    pub total_expense: f64,
    /// Up to [MAX_CATEGORIES] expense categories, largest first.
    pub category_totals: Vec<CategoryTotal>,
    /// Up to [MAX_RECENT] transactions in the order the Gateway returned them.
    pub recent: Vec<Transaction>,
}

impl DashboardSummary {
    /// Income minus expenses.
    pub fn balance(&self) -> f64 {
        self.total_income - self.total_expense
    }
}

/// Summarize `transactions` for the dashboard.
///
/// Categories with equal totals keep the order in which they were first seen.
pub fn summarize(transactions: &[Transaction]) -> DashboardSummary {
    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut category_totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions {
        match transaction.type_ {
            TransactionType::Income => total_income += transaction.amount,
            TransactionType::Expense => {
                total_expense += transaction.amount;
                add_to_category(&mut category_totals, transaction);
            }
        }
    }

    // `sort_by` is stable, so ties stay in first-seen order.
    category_totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    category_totals.truncate(MAX_CATEGORIES);

    DashboardSummary {
        total_income,
        total_expense,
        category_totals,
        recent: transactions.iter().take(MAX_RECENT).cloned().collect(),
    }
}

fn add_to_category(category_totals: &mut Vec<CategoryTotal>, transaction: &Transaction) {
    match category_totals
        .iter_mut()
        .find(|total| total.category == transaction.category)
    {
        Some(total) => total.total += transaction.amount,
        None => category_totals.push(CategoryTotal {
            category: transaction.category.clone(),
            total: transaction.amount,
        }),
    }
}
